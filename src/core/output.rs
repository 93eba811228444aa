//! Compact output rendering helpers for the text report surface.
//!
//! Keeps card summaries and contact notes bounded and readable in terminal
//! output while preserving signal.

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Render a completion ratio as a whole percentage, e.g. `50%`.
pub fn percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}
