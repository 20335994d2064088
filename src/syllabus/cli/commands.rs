//! # CLI Layer
//!
//! This module is **one possible UI client** for syllabus. It is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Each invocation starts from an empty course, replays the given script through
//! [`CourseApi`], then prints the result. Nothing is persisted. With `--verbose`
//! the messages of every replayed step are printed before the result.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Loads configuration and starts logging
//! - `handle_*()`: Per-command handlers that call the API and format output

use super::print::{print_course, print_messages, print_outline};
use super::script;
use super::setup::{Cli, Commands};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use syllabus::api::CourseApi;
use syllabus::config::SyllabusConfig;
use syllabus::error::{Result, SyllabusError};
use syllabus::logging::init_logging;

struct AppContext {
    api: CourseApi,
    config: SyllabusConfig,
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Run { script, search } => handle_run(&mut ctx, &script, search),
        Commands::Outline { script, search } => handle_outline(&mut ctx, &script, search),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match &cli.config {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let config = SyllabusConfig::load(&config_dir)?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_logging(level).map_err(SyllabusError::Api)?;
    info!("event=config_loaded dir={}", config_dir.display());

    Ok(AppContext {
        api: CourseApi::new(),
        config,
        verbose: cli.verbose,
    })
}

fn replay_script(ctx: &mut AppContext, path: &Path) -> Result<()> {
    let steps = script::load(path)?;
    let messages = script::replay(&mut ctx.api, steps)?;
    // Step messages are a trace of the replay; only shown when asked for.
    if ctx.verbose && !messages.is_empty() {
        print_messages(&messages);
        println!();
    }
    Ok(())
}

fn handle_run(ctx: &mut AppContext, path: &Path, search: Option<String>) -> Result<()> {
    replay_script(ctx, path)?;

    let query = search.unwrap_or_default();
    if ctx.config.show_outline {
        let entries = ctx.api.outline(&query)?;
        if !entries.is_empty() {
            print_outline(ctx.api.store(), &entries)?;
            println!();
        }
    }

    let view = ctx.api.view(&query)?;
    print_course(ctx.api.store(), &view, &query, ctx.config.show_urls)
}

fn handle_outline(ctx: &mut AppContext, path: &Path, search: Option<String>) -> Result<()> {
    replay_script(ctx, path)?;

    let query = search.unwrap_or_default();
    let entries = ctx.api.outline(&query)?;
    print_outline(ctx.api.store(), &entries)
}
