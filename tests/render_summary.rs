use proptest::prelude::*;

use gloc::engine::render::{render_summary, ELLIPSIS, MIN_RENDER_WIDTH};
use gloc::engine::terminal::size_or_fallback;
use gloc::engine::TerminalSize;
use gloc_test_utils::sink::FixedProbe;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn shows_done_count_and_pending_names() {
    let text = render_summary(2, 5, &names(&["alpha", "beta"]), 80);
    assert_eq!(text, "3| alpha, beta");
}

#[test]
fn narrow_terminal_renders_nothing() {
    for width in 0..MIN_RENDER_WIDTH {
        assert_eq!(render_summary(1, 2, &names(&["a"]), width), "");
    }
    assert_eq!(render_summary(1, 2, &names(&["a"]), MIN_RENDER_WIDTH), "1| a");
}

#[test]
fn text_that_fits_exactly_is_not_truncated() {
    // "0| abcdef" is 9 characters.
    assert_eq!(render_summary(1, 1, &names(&["abcdef"]), 9), "0| abcdef");
}

#[test]
fn fallback_width_truncates_eighty_characters_to_fifty() {
    let size = size_or_fallback(&FixedProbe::unavailable());
    assert_eq!(size, TerminalSize { width: 50, height: 1 });

    // "0| " + 77 characters = 80.
    let pending = vec!["x".repeat(77)];
    let text = render_summary(1, 1, &pending, size.width);

    assert_eq!(text.chars().count(), 50);
    assert!(text.ends_with(ELLIPSIS));
    let kept: String = text.chars().take(46).collect();
    assert_eq!(kept, format!("0| {}", "x".repeat(43)));
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let pending = names(&["ääääää", "öööööö"]);
    let text = render_summary(2, 2, &pending, 10);
    assert_eq!(text.chars().count(), 10);
    assert_eq!(text, "0| äää ...");
}

proptest! {
    #[test]
    fn rendered_text_never_exceeds_width(
        pending in proptest::collection::vec("[a-z0-9_-]{0,12}", 0..20),
        extra_done in 0usize..50,
        width in 0usize..120,
    ) {
        let remaining = pending.len();
        let total = remaining + extra_done;
        let text = render_summary(remaining, total, &pending, width);
        let full = format!("{extra_done}| {}", pending.join(", "));

        prop_assert!(text.chars().count() <= width);

        if width < MIN_RENDER_WIDTH {
            prop_assert!(text.is_empty());
        } else if full.chars().count() > width {
            prop_assert_eq!(text.chars().count(), width);
            prop_assert!(text.ends_with(ELLIPSIS));
        } else {
            prop_assert_eq!(text, full);
        }
    }
}
