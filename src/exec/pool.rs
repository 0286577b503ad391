// src/exec/pool.rs

//! Bounded worker pool.
//!
//! Concurrency is bounded by a counting semaphore, separately from the
//! channel that carries results. A permit is taken before the executor
//! starts and released as soon as it returns, before the completion event
//! is sent, so a slow consumer never holds up the next task.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::engine::{CompletionEvent, Task};
use crate::errors::{GlocError, Result};

use super::backend::ExecutorBackend;

/// Concurrency bound used when none is configured.
pub const DEFAULT_WORKERS: usize = 10;

pub struct WorkerPool<E: ExecutorBackend> {
    executor: Arc<E>,
    limit: Arc<Semaphore>,
    workers: usize,
}

impl<E: ExecutorBackend> std::fmt::Debug for WorkerPool<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .field("available", &self.limit.available_permits())
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> WorkerPool<E> {
    /// `workers` is the maximum number of tasks executing at once; it must
    /// be between 1 and [`Semaphore::MAX_PERMITS`].
    pub fn new(executor: Arc<E>, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(GlocError::ConfigError(
                "workers must be >= 1 (got 0)".to_string(),
            ));
        }
        if workers > Semaphore::MAX_PERMITS {
            return Err(GlocError::ConfigError(format!(
                "workers must be <= {} (got {workers})",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self {
            executor,
            limit: Arc::new(Semaphore::new(workers)),
            workers,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Start every task. Each one runs exactly once, in no particular order.
    ///
    /// The returned set completes when every task has run and handed its
    /// event to `events` (or found the receiver gone).
    pub fn dispatch(
        &self,
        tasks: Vec<Task>,
        events: mpsc::Sender<CompletionEvent>,
    ) -> JoinSet<()> {
        let mut set = JoinSet::new();
        debug!(count = tasks.len(), workers = self.workers, "dispatching tasks");

        for task in tasks {
            let executor = Arc::clone(&self.executor);
            let limit = Arc::clone(&self.limit);
            let events = events.clone();

            set.spawn(async move {
                let event = match limit.acquire_owned().await {
                    Ok(_permit) => executor.execute(&task).await,
                    // The semaphore is never closed; report the task as failed
                    // rather than losing its event.
                    Err(err) => {
                        warn!(path = %task.path.display(), error = %err, "worker slot unavailable; task not run");
                        CompletionEvent::failure(&task.path, format!("worker slot unavailable: {err}"))
                    }
                };

                if events.send(event).await.is_err() {
                    warn!(path = %task.path.display(), "status aggregator gone; dropping result");
                }
            });
        }

        set
    }
}
