// src/engine/runtime.rs

use std::fmt;
use std::io::Write;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::{GlocError, Result};
use crate::types::OutputPolicy;

use super::core::{AggregateState, StatusStep};
use super::output::{style_summary, write_record};
use super::render::render_summary;
use super::terminal::{size_or_fallback, TerminalProbe};
use super::{CompletionEvent, RunReport};

/// Summary lines never use more than this many columns.
pub const MAX_SUMMARY_WIDTH: usize = 100;

/// Sole consumer of the completion stream and sole writer of `out`.
///
/// This is the async IO shell around [`AggregateState`]. It runs on one
/// Tokio task; since nothing else holds the state, no locking is needed.
pub struct StatusAggregator<W, P> {
    state: AggregateState,
    event_rx: mpsc::Receiver<CompletionEvent>,
    out: W,
    probe: P,
    policy: OutputPolicy,
}

impl<W, P> fmt::Debug for StatusAggregator<W, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusAggregator")
            .field("state", &self.state)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send, P: TerminalProbe> StatusAggregator<W, P> {
    pub fn new(
        state: AggregateState,
        event_rx: mpsc::Receiver<CompletionEvent>,
        out: W,
        probe: P,
        policy: OutputPolicy,
    ) -> Self {
        Self {
            state,
            event_rx,
            out,
            probe,
            policy,
        }
    }

    /// Consume events until nothing is pending.
    ///
    /// Per event: erase the summary line, record the result, print the
    /// permanent record, then either stop (nothing pending) or redraw the
    /// summary without a trailing newline.
    pub async fn run(mut self) -> Result<RunReport> {
        let total = self.state.total();
        info!(total, "status aggregator started");

        while self.state.remaining_count() > 0 {
            let Some(event) = self.event_rx.recv().await else {
                let remaining = self.state.remaining_count();
                self.erase_line()?;
                self.out.flush()?;
                return Err(GlocError::EventStreamClosed { remaining });
            };

            debug!(
                path = %event.path.display(),
                succeeded = event.succeeded,
                "aggregator received event"
            );

            self.erase_line()?;
            let step = self.state.apply(event);

            if let Some(record) = &step.record {
                write_record(&mut self.out, record, &self.policy)?;
            }

            if !step.keep_running {
                self.out.flush()?;
                break;
            }

            self.draw_summary(&step)?;
        }

        let report = RunReport {
            total,
            succeeded: self.state.succeeded_count(),
            failed: self.state.failed_count(),
        };
        info!(?report, "all directories finished");
        Ok(report)
    }

    fn erase_line(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::CurrentLine), MoveToColumn(0))?;
        Ok(())
    }

    fn draw_summary(&mut self, step: &StatusStep) -> Result<()> {
        let width = size_or_fallback(&self.probe).width.min(MAX_SUMMARY_WIDTH);
        let text = render_summary(step.remaining, self.state.total(), &step.pending, width);
        debug!(remaining = step.remaining, width, "redrawing summary");

        if !text.is_empty() {
            write!(self.out, "{}", style_summary(&text))?;
        }
        self.out.flush()?;
        Ok(())
    }
}
