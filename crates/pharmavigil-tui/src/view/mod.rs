pub mod dashboard;
pub mod detail;
pub mod help;
pub mod notice;

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "…" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.len() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Display an optional field, falling back to "-" like the web client does.
pub fn dash(value: Option<&str>) -> &str {
    match value {
        Some(v) => v,
        None => "-",
    }
}

/// Adverse events joined for tabular display, "-" when empty.
pub fn events_label(events: &[String]) -> String {
    if events.is_empty() {
        "-".to_string()
    } else {
        events.join(", ")
    }
}
