// src/engine/core.rs

//! Pure aggregate state for a run.
//!
//! `AggregateState` consumes [`CompletionEvent`]s and produces a
//! [`StatusStep`] describing what the IO shell should print. It has no
//! channels, no Tokio types, and does not perform any IO, so exactly one
//! owner (the aggregator task) ever mutates it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{project_name, CompletionEvent};

/// Status of one task directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStatus {
    Pending,
    Done { succeeded: bool, output: String },
}

/// Permanent record produced when a directory finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub name: String,
    pub succeeded: bool,
    pub output: String,
}

/// Decision returned after applying a single event.
#[derive(Debug, Clone)]
pub struct StatusStep {
    /// Record to print, `None` if the event was ignored.
    pub record: Option<TaskRecord>,
    pub remaining: usize,
    /// Names of directories still pending, computed fresh for this step.
    pub pending: Vec<String>,
    /// `false` once nothing is pending; the caller stops consuming then.
    pub keep_running: bool,
}

#[derive(Debug, Default)]
pub struct AggregateState {
    statuses: HashMap<PathBuf, PathStatus>,
}

impl AggregateState {
    /// Every path starts `Pending`. Must be built before any task runs.
    pub fn new<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let statuses = paths
            .into_iter()
            .map(|path| (path, PathStatus::Pending))
            .collect();
        Self { statuses }
    }

    pub fn total(&self) -> usize {
        self.statuses.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| matches!(s, PathStatus::Pending))
            .count()
    }

    pub fn pending_names(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|(_, s)| matches!(s, PathStatus::Pending))
            .map(|(path, _)| project_name(path))
            .collect()
    }

    pub fn status_of(&self, path: &Path) -> Option<&PathStatus> {
        self.statuses.get(path)
    }

    pub fn succeeded_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| matches!(s, PathStatus::Done { succeeded: true, .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| matches!(s, PathStatus::Done { succeeded: false, .. }))
            .count()
    }

    /// Apply one completion event.
    ///
    /// Unknown paths and repeated completions are ignored: a status only
    /// ever moves `Pending -> Done`, once.
    pub fn apply(&mut self, event: CompletionEvent) -> StatusStep {
        let record = match self.statuses.get_mut(&event.path) {
            None => {
                warn!(path = %event.path.display(), "completion for unknown directory; ignoring");
                None
            }
            Some(PathStatus::Done { .. }) => {
                warn!(path = %event.path.display(), "duplicate completion; ignoring");
                None
            }
            Some(status @ PathStatus::Pending) => {
                *status = PathStatus::Done {
                    succeeded: event.succeeded,
                    output: event.output.clone(),
                };
                Some(TaskRecord {
                    name: project_name(&event.path),
                    succeeded: event.succeeded,
                    output: event.output,
                })
            }
        };

        let remaining = self.remaining_count();
        StatusStep {
            record,
            remaining,
            pending: self.pending_names(),
            keep_running: remaining > 0,
        }
    }
}
