// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The worker pool talks to an `ExecutorBackend` instead of spawning
//! processes itself. `RealExecutorBackend` runs real commands through
//! [`run_command`]; tests provide their own backend that scripts outcomes
//! and delays without touching the OS.

use std::future::Future;
use std::pin::Pin;

use crate::engine::{CompletionEvent, Task};

use super::task_runner::run_command;

/// Trait abstracting how a single task is executed.
///
/// Implementations must not fail: any problem running the task is reported
/// as a failed `CompletionEvent`.
pub trait ExecutorBackend: Send + Sync + 'static {
    fn execute<'a>(
        &'a self,
        task: &'a Task,
    ) -> Pin<Box<dyn Future<Output = CompletionEvent> + Send + 'a>>;
}

/// Real executor backend used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealExecutorBackend;

impl RealExecutorBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn execute<'a>(
        &'a self,
        task: &'a Task,
    ) -> Pin<Box<dyn Future<Output = CompletionEvent> + Send + 'a>> {
        Box::pin(run_command(&task.path, &task.command))
    }
}
