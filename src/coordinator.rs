// src/coordinator.rs

//! Wires directories into tasks, the worker pool and the status aggregator.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::{AggregateState, CompletionEvent, RunReport, StatusAggregator, Task, TerminalProbe};
use crate::errors::{GlocError, Result};
use crate::exec::{ExecutorBackend, WorkerPool};
use crate::types::{CommandSpec, OutputPolicy};

/// Completion events are handed over one at a time.
///
/// Tokio has no zero-capacity channel; with capacity 1 a worker's `send`
/// waits whenever an earlier event has not been taken yet.
const EVENT_CHANNEL_CAPACITY: usize = 1;

pub struct Coordinator<E: ExecutorBackend, W, P> {
    pool: WorkerPool<E>,
    policy: OutputPolicy,
    out: W,
    probe: P,
}

impl<E, W, P> Coordinator<E, W, P>
where
    E: ExecutorBackend,
    W: Write + Send + 'static,
    P: TerminalProbe + 'static,
{
    pub fn new(
        executor: Arc<E>,
        workers: usize,
        policy: OutputPolicy,
        out: W,
        probe: P,
    ) -> Result<Self> {
        let pool = WorkerPool::new(executor, workers)?;
        Ok(Self {
            pool,
            policy,
            out,
            probe,
        })
    }

    /// Run `command` once in every directory of `paths` and wait for all of
    /// them to finish.
    pub async fn run(self, paths: Vec<PathBuf>, command: CommandSpec) -> Result<RunReport> {
        if paths.is_empty() {
            return Ok(RunReport::default());
        }

        // All paths are known to the state before the first task can finish.
        let state = AggregateState::new(paths.iter().cloned());

        let (event_tx, event_rx) = mpsc::channel::<CompletionEvent>(EVENT_CHANNEL_CAPACITY);
        let aggregator = StatusAggregator::new(state, event_rx, self.out, self.probe, self.policy);
        let aggregator = tokio::spawn(aggregator.run());

        let command = Arc::new(command);
        let tasks: Vec<Task> = paths
            .into_iter()
            .map(|path| Task::new(path, Arc::clone(&command)))
            .collect();

        info!(
            tasks = tasks.len(),
            workers = self.pool.workers(),
            cmd = %command,
            "starting run"
        );

        let mut workers = self.pool.dispatch(tasks, event_tx);
        while let Some(joined) = workers.join_next().await {
            joined.map_err(|e| GlocError::Other(anyhow!("worker task failed: {e}")))?;
        }
        debug!("all workers finished");

        aggregator
            .await
            .map_err(|e| GlocError::Other(anyhow!("status aggregator failed: {e}")))?
    }
}
