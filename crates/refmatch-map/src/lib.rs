//! Fuzzy matching of free-text import values against canonical reference
//! records.
//!
//! A value such as `"bdg"` or `"Bank Muamalat"` is scored against every
//! candidate with several independent strategies (exact, alias, boilerplate
//! stripping, containment, word overlap, edit distance). Survivors are
//! ranked, and [`classify`] turns the ranking into an accept/reject tier for
//! the import pipeline.

#![deny(unsafe_code)]

pub mod aliases;
pub mod config;
pub mod confidence;
pub mod edit_distance;
pub mod engine;
pub mod patterns;
pub mod score;
pub mod utils;

pub use aliases::AliasRegistry;
pub use config::{ConfigError, MatcherConfig, PatternOverrides};
pub use confidence::{ConfidenceThresholds, classify, classify_with};
pub use edit_distance::{distance, similarity};
pub use engine::{
    BatchResult, FieldMatcher, Resolution, find_bank_matches, find_category_matches,
    find_city_matches, find_matches, find_province_matches, find_subject_matches,
};
pub use patterns::PatternBook;
pub use score::{FieldScore, MultiStrategyScorer, Strategy, StrategyScore};
