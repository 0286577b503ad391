// src/engine/output.rs

//! Formatting of the permanent per-directory record lines.

use std::io::{self, Write};

use colored::Colorize;

use super::core::TaskRecord;
use crate::types::OutputPolicy;

pub const SUCCESS_MARKER: &str = "✔";
pub const FAILURE_MARKER: &str = "✖";

/// Write the record for one finished directory.
///
/// Without `--output` this is a single `✔ name` / `✖ name` line. With it,
/// the name becomes a coloured banner and the captured text follows unless
/// the policy suppresses it.
pub fn write_record<W: Write>(
    out: &mut W,
    record: &TaskRecord,
    policy: &OutputPolicy,
) -> io::Result<()> {
    let marker = if record.succeeded {
        SUCCESS_MARKER
    } else {
        FAILURE_MARKER
    };

    if !policy.show_output {
        let marker = if record.succeeded {
            marker.green()
        } else {
            marker.red()
        };
        return writeln!(out, "{} {}", marker, record.name.white());
    }

    let banner = format!(" {marker} {} ", record.name);
    let banner = if record.succeeded {
        banner.black().on_green()
    } else {
        banner.black().on_red()
    };
    writeln!(out, "{banner}")?;

    if policy.should_show(record.succeeded, &record.output) {
        writeln!(out, "{}", record.output.trim_end())?;
    }
    Ok(())
}

/// Style for the transient summary line.
pub fn style_summary(text: &str) -> String {
    text.cyan().to_string()
}
