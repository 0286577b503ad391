// src/engine/terminal.rs

//! Terminal size lookup.
//!
//! The summary line is best-effort. A failed lookup (output piped to a
//! file, no controlling terminal) falls back to [`TerminalSize::FALLBACK`]
//! and is never an error.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: usize,
    pub height: usize,
}

impl TerminalSize {
    pub const FALLBACK: TerminalSize = TerminalSize {
        width: 50,
        height: 1,
    };
}

/// Something that can report the current terminal size.
pub trait TerminalProbe: Send {
    fn size(&self) -> Option<TerminalSize>;
}

/// Queries the real terminal through `crossterm`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermProbe;

impl TerminalProbe for CrosstermProbe {
    fn size(&self) -> Option<TerminalSize> {
        match crossterm::terminal::size() {
            Ok((width, height)) => Some(TerminalSize {
                width: usize::from(width),
                height: usize::from(height),
            }),
            Err(err) => {
                trace!(error = %err, "terminal size query failed");
                None
            }
        }
    }
}

pub fn size_or_fallback(probe: &dyn TerminalProbe) -> TerminalSize {
    probe.size().unwrap_or(TerminalSize::FALLBACK)
}
