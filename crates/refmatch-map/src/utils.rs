//! Utility functions for matching operations.

/// Normalizes text for comparison by lowercasing and collapsing whitespace.
///
/// Punctuation is kept: boilerplate such as `"pt. bank "` is matched with it.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Character length, not byte length.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Rounds a ratio-derived score and clamps it into `0..=100`.
pub(crate) fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
