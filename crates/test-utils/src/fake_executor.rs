use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use gloc::engine::{project_name, CompletionEvent, Task};
use gloc::exec::ExecutorBackend;

/// A fake executor that:
/// - records which directories were "run"
/// - sleeps for a fixed delay instead of spawning a process
/// - fails the directories it was told to fail
/// - tracks how many executions overlapped at most
#[derive(Debug, Default)]
pub struct FakeExecutor {
    delay: Duration,
    failing: HashSet<String>,
    outputs: HashMap<String, String>,
    executed: Mutex<Vec<PathBuf>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail every directory whose project name is `name`.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Captured output to report for project `name`.
    pub fn with_output(mut self, name: &str, output: &str) -> Self {
        self.outputs.insert(name.to_string(), output.to_string());
        self
    }

    pub fn executed(&self) -> Vec<PathBuf> {
        self.executed.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute<'a>(
        &'a self,
        task: &'a Task,
    ) -> Pin<Box<dyn Future<Output = CompletionEvent> + Send + 'a>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.executed.lock().unwrap().push(task.path.clone());

            let name = project_name(&task.path);
            let output = self.outputs.get(&name).cloned().unwrap_or_default();
            if self.failing.contains(&name) {
                CompletionEvent::failure(&task.path, output)
            } else {
                CompletionEvent::success(&task.path, output)
            }
        })
    }
}
