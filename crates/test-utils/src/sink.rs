use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use gloc::engine::{TerminalProbe, TerminalSize};

/// Cloneable in-memory `Write` sink. Hand one clone to the aggregator and
/// read the other after the run.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }

    /// Lines that were terminated with `\n`, with terminal escape sequences
    /// and the transient summary text removed.
    pub fn record_lines(&self) -> Vec<String> {
        let text = self.contents();
        let mut lines: Vec<String> = text.split('\n').map(strip_transient).collect();
        // The last piece was never terminated.
        lines.pop();
        lines
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Drop everything up to the last "erase line" sequence and any remaining
/// CSI escapes.
fn strip_transient(line: &str) -> String {
    const ERASE: &str = "\x1b[2K";
    let visible = match line.rfind(ERASE) {
        Some(idx) => &line[idx + ERASE.len()..],
        None => line,
    };
    strip_csi(visible)
}

fn strip_csi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameters end at the first byte in '@'..='~'.
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Terminal probe with a fixed answer; `None` simulates a failed query.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub Option<TerminalSize>);

impl FixedProbe {
    pub fn width(width: usize) -> Self {
        FixedProbe(Some(TerminalSize { width, height: 24 }))
    }

    pub fn unavailable() -> Self {
        FixedProbe(None)
    }
}

impl TerminalProbe for FixedProbe {
    fn size(&self) -> Option<TerminalSize> {
        self.0
    }
}
