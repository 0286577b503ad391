// src/engine/render.rs

//! Summary-line rendering.

/// Widths below this render nothing.
pub const MIN_RENDER_WIDTH: usize = 5;

/// Appended to a truncated summary. Four characters, so a truncated line
/// fills the width exactly.
pub const ELLIPSIS: &str = " ...";

/// Build the transient summary: `"<done>| <pending, names>"`.
///
/// The result is never longer than `width` characters. When it has to be
/// cut, the first `width - 4` characters are kept and [`ELLIPSIS`] is
/// appended. Widths under [`MIN_RENDER_WIDTH`] yield an empty string.
pub fn render_summary(remaining: usize, total: usize, pending: &[String], width: usize) -> String {
    if width < MIN_RENDER_WIDTH {
        return String::new();
    }

    let done = total.saturating_sub(remaining);
    let line = format!("{done}| {}", pending.join(", "));

    if line.chars().count() <= width {
        return line;
    }

    let keep = width - ELLIPSIS.chars().count();
    let mut truncated: String = line.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
