// src/lib.rs

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod discover;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod exit;
pub mod fs;
pub mod logging;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::{build_exclude_set, load_optional, RunConfig};
use crate::coordinator::Coordinator;
use crate::engine::{CrosstermProbe, RunReport};
use crate::errors::Result;
use crate::exec::RealExecutorBackend;
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config file + CLI flag resolution
/// - directory discovery
/// - the coordinator (worker pool + status aggregator) writing to stdout
///
/// Any error returned here is fatal and happens before task output starts,
/// except for a broken stdout during the run.
pub async fn run(args: CliArgs) -> Result<RunReport> {
    let command = args.command_spec()?;

    let file = load_optional(args.config.as_deref().map(Path::new))?;
    let cfg = RunConfig::resolve(&args, &file);
    let excludes = build_exclude_set(&cfg.exclude)?;

    let root = discover::expand_home(&args.root)?;
    let dirs = discover::discover(&RealFileSystem, &root, args.discovery_mode(), &excludes)?;

    if dirs.is_empty() {
        println!("No repos found in '{}'", root.display());
        return Ok(RunReport::default());
    }

    info!(count = dirs.len(), root = %root.display(), "running command");

    let coordinator = Coordinator::new(
        Arc::new(RealExecutorBackend::new()),
        cfg.workers,
        cfg.policy,
        std::io::stdout(),
        CrosstermProbe,
    )?;
    coordinator.run(dirs, command).await
}
