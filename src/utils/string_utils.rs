//! Pure string processing utilities

/// Trim and collapse inner whitespace to single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check if a string is empty after trimming
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Normalize a column header for comparison: trimmed, single-spaced, lowercase
pub fn normalize_header(header: &str) -> String {
    normalize_whitespace(header).to_lowercase()
}
