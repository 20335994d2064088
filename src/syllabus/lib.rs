//! # Syllabus Architecture
//!
//! Syllabus is a **UI-agnostic course builder engine**. A course is an ordered list
//! of modules, each holding an ordered list of content items (links and files), plus
//! one ordered list of independent items that belong to no module.
//!
//! The crate holds the state and the rules; drawing the course is somebody else's job.
//! The bundled CLI is one such client: it replays JSON scripts of operations and prints
//! the resulting course.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, replays scripts, prints the course     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, filter and drag/drop          │
//! │  - Normalizes inputs (display refs → UUIDs)                 │
//! │  - Owns the course, the drag session and the gesture queue  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine Layer (commands/*.rs, filter.rs, dnd.rs)            │
//! │  - Mutations, search visibility, drop translation           │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Read-only CourseStore trait                              │
//! │  - InMemoryStore, the single owner of all course state      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Rules
//!
//! Every item lives in exactly one container: one module's item list or the
//! independent list. Membership is positional, so a module's items are the ones
//! stored under it and an item's order is its index. There is no separate order
//! field to keep in sync.
//!
//! Deleting a module deletes the items it holds. Moving an item between containers
//! is a single operation that detaches and reattaches it, or fails and leaves the
//! course untouched.
//!
//! ## Drag and Drop
//!
//! Gesture events go through [`dnd::DragSession`]. A drop is offered to the targets
//! under the pointer from the deepest outwards; the first one that handles it claims
//! it, and outer targets see the claim and stand down. A drop nobody claims does
//! nothing. See `dnd.rs` for the full rules table.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`, borrowed views)
//! - **Never** writes to stdout/stderr (diagnostics go through the `log` facade)
//! - **Never** calls `std::process::exit`
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Mutation engine, one file per operation family
//! - [`filter`]: Live search and the visibility cascade
//! - [`dnd`]: Drag session and drop-to-command translation
//! - [`store`]: Storage trait and the in-memory implementation
//! - [`model`]: Core data types (`Module`, `Item`, `Container`)
//! - [`index`]: Display references (`2`, `2.3`, `i1`) used by the CLI and scripts
//! - [`config`]: Configuration management
//! - [`logging`]: Logger bootstrap for binaries
//! - [`error`]: Error types
//! - `cli`: Argument parsing, script replay and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod dnd;
pub mod error;
pub mod filter;
pub mod index;
pub mod logging;
pub mod model;
pub mod store;
