// src/engine/mod.rs

//! Progress tracking and rendering for a run.
//!
//! - [`core`] is the pure aggregate state: which directories are still
//!   pending, which are done, and what the last event changed.
//! - [`runtime`] is the async shell around it that receives
//!   `CompletionEvent`s, writes records and redraws the summary line.
//! - [`render`] turns counts and names into the summary text.
//! - [`terminal`] answers "how wide is the terminal", with a fallback.
//! - [`output`] formats the permanent per-directory record lines.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::types::CommandSpec;

/// One unit of work: run `command` inside `path`.
#[derive(Debug, Clone)]
pub struct Task {
    pub path: PathBuf,
    pub command: Arc<CommandSpec>,
}

impl Task {
    pub fn new(path: impl Into<PathBuf>, command: Arc<CommandSpec>) -> Self {
        Self {
            path: path.into(),
            command,
        }
    }
}

/// Result of one finished task. Sent exactly once per `Task`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub path: PathBuf,
    pub succeeded: bool,
    /// Combined stdout/stderr, possibly empty.
    pub output: String,
}

impl CompletionEvent {
    pub fn success(path: impl Into<PathBuf>, output: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            succeeded: true,
            output: output.into(),
        }
    }

    pub fn failure(path: impl Into<PathBuf>, output: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            succeeded: false,
            output: output.into(),
        }
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Display label for a task directory: its last path segment.
pub fn project_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub mod core;
pub mod output;
pub mod render;
pub mod runtime;
pub mod terminal;

pub use self::core::{AggregateState, PathStatus, StatusStep, TaskRecord};
pub use runtime::StatusAggregator;
pub use terminal::{CrosstermProbe, TerminalProbe, TerminalSize};
