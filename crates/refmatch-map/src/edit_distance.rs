//! Levenshtein distance and the normalized character similarity built on it.

use rapidfuzz::distance::levenshtein;

use crate::utils::{char_len, to_score};

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`. Case-sensitive.
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Character similarity on a 0 to 100 scale.
///
/// Blank input on either side scores 0; callers decide what two blanks mean.
/// Comparison is case-insensitive and ignores surrounding whitespace.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }
    let max_len = char_len(&a).max(char_len(&b));
    let dist = distance(&a, &b).min(max_len);
    to_score((max_len - dist) as f64 / max_len as f64 * 100.0)
}
