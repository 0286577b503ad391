// src/exit.rs

//! Process exit status for a finished run.
//!
//! - `0`: every directory succeeded, or none were found.
//! - `1`: at least one directory's command failed.
//! - `2`: a fatal error stopped the run (bad arguments, config, root).

use crate::engine::RunReport;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_TASK_FAILED: u8 = 1;
pub const EXIT_FATAL: u8 = 2;

pub fn exit_status<E>(result: &Result<RunReport, E>) -> u8 {
    match result {
        Ok(report) if report.all_succeeded() => EXIT_SUCCESS,
        Ok(_) => EXIT_TASK_FAILED,
        Err(_) => EXIT_FATAL,
    }
}
