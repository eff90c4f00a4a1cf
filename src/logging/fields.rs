//! Field helpers for structured logging

/// Maximum number of characters of a prompt included in logs.
pub const PROMPT_PREVIEW_CHARS: usize = 100;

/// Truncated prompt for log output, or `None` when prompt logging is off.
///
/// # Examples
///
/// ```
/// use herald::logging::prompt_preview;
///
/// assert_eq!(prompt_preview("announce new feature", true).as_deref(), Some("announce new feature"));
/// assert!(prompt_preview("announce new feature", false).is_none());
/// ```
pub fn prompt_preview(prompt: &str, enabled: bool) -> Option<String> {
    if !enabled {
        return None;
    }

    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(truncate_chars(trimmed, PROMPT_PREVIEW_CHARS))
}

/// Truncate on a char boundary, appending "..." when anything was cut.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
