// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::errors::Result;
use crate::types::{CommandSpec, DiscoveryMode};

/// Command-line arguments for `gloc`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gloc",
    version,
    about = "Run a command in every repository under a directory, in parallel.",
    after_help = "Example: gloc \"git fetch\" ~/Documents/Projects",
    long_about = None
)]
pub struct CliArgs {
    /// Command to run in each directory (passed to `sh -c` unless `--split`).
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Directory to search for repositories. `~` expands to the home directory.
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: String,

    /// Show the output of the command for each directory.
    #[arg(long)]
    pub output: bool,

    /// Do not show output when the command printed nothing.
    #[arg(long)]
    pub ignore_empty: bool,

    /// Do not show output of directories where the command failed.
    #[arg(long)]
    pub ignore_errors: bool,

    /// Search subdirectories recursively (skips `node_modules` and `.git`).
    #[arg(long)]
    pub recurse_into: bool,

    /// Use every directory directly under ROOT, git repository or not.
    #[arg(long)]
    pub all_dirs: bool,

    /// Maximum number of commands running at the same time (default 10).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: Option<u64>,

    /// Split COMMAND on spaces and run it without a shell.
    ///
    /// Quoted arguments are not understood in this mode.
    #[arg(long)]
    pub split: bool,

    /// Extra directory-name glob to skip while recursing (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Path to a TOML config file with default settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GLOC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    pub fn command_spec(&self) -> Result<CommandSpec> {
        if self.split {
            CommandSpec::split_on_spaces(&self.command)
        } else {
            CommandSpec::shell(self.command.clone())
        }
    }

    pub fn discovery_mode(&self) -> DiscoveryMode {
        DiscoveryMode::from_flags(self.all_dirs, self.recurse_into)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
