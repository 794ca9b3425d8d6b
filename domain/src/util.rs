//! Shared utility functions.

/// Shorten `text` to at most `max_chars` characters for log lines and
/// narrow table columns, marking the cut with `…`.
///
/// Counts characters rather than bytes, so multi-byte text is never split
/// inside a code point.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
