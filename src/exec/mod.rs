// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`task_runner`] runs one command in one directory with
//!   `tokio::process::Command` and turns the outcome into a
//!   `CompletionEvent`.
//! - [`backend`] provides the `ExecutorBackend` trait and the
//!   `RealExecutorBackend` used in production; tests swap in a fake.
//! - [`pool`] bounds how many backend invocations run at the same time.

pub mod backend;
pub mod pool;
pub mod task_runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use pool::{WorkerPool, DEFAULT_WORKERS};
pub use task_runner::run_command;
