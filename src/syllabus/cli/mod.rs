pub mod commands;
mod print;
mod script;
mod setup;
