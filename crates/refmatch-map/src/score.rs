//! Multi-strategy similarity scoring between free text and a candidate.
//!
//! Each strategy is independent and yields an optional score. The composite
//! is the maximum over strategies, never an average: one strong signal wins
//! even when the others disagree.

use refmatch_model::{CandidateRecord, FieldType, MatchType, NameField};

use crate::aliases::AliasRegistry;
use crate::edit_distance::similarity;
use crate::patterns::PatternBook;
use crate::utils::{char_len, normalize_text, to_score};

const EXACT_SCORE: u8 = 100;
const ALIAS_SCORE: u8 = 95;
/// Pattern scores at or above this are labeled partial.
const PATTERN_PARTIAL_MIN: u8 = 85;
/// Shortest substring accepted as containment evidence.
const CONTAINS_MIN_LEN: usize = 2;
/// Substrings this long or longer use the full weight.
const CONTAINS_FULL_WEIGHT_LEN: usize = 4;
const CONTAINS_WEIGHT: f64 = 90.0;
const CONTAINS_SHORT_WEIGHT: f64 = 75.0;
const SINGLE_WORD_HIT_SCORE: u8 = 80;
const WORD_SIMILARITY_MIN: u8 = 80;
const WORD_PERFECT_WEIGHT: f64 = 85.0;
const WORD_PARTIAL_WEIGHT: f64 = 75.0;
const WORD_EXACT_BONUS: f64 = 10.0;
const WORD_SCORE_CAP: u8 = 95;

/// One independent scoring heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Exact,
    Alias,
    Pattern,
    Contains,
    WordOverlap,
    Character,
}

impl Strategy {
    /// Cheap, high-precision strategies tried first across all name fields.
    pub const PRECISE: [Strategy; 2] = [Strategy::Exact, Strategy::Alias];
    /// Tried per name field when no precise strategy fires.
    pub const FALLBACK: [Strategy; 4] = [
        Strategy::Pattern,
        Strategy::Contains,
        Strategy::WordOverlap,
        Strategy::Character,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Exact => "exact",
            Strategy::Alias => "alias",
            Strategy::Pattern => "pattern",
            Strategy::Contains => "contains",
            Strategy::WordOverlap => "word overlap",
            Strategy::Character => "character",
        }
    }

    /// Scores one normalized input against one normalized candidate text.
    pub fn evaluate(&self, ctx: &StrategyContext<'_>) -> Option<StrategyScore> {
        let (score, match_type) = match self {
            Strategy::Exact => (exact_score(ctx.input, ctx.candidate)?, MatchType::Exact),
            Strategy::Alias => {
                let target = ctx.alias_target?;
                (alias_score(target, ctx.candidate)?, MatchType::Alias)
            }
            Strategy::Pattern => {
                let (patterns, field_type) = ctx.patterns.zip(ctx.field_type)?;
                let score = patterns.boosted_score(ctx.input, ctx.candidate, field_type);
                if score == 0 {
                    return None;
                }
                let label = if score >= PATTERN_PARTIAL_MIN {
                    MatchType::Partial
                } else {
                    MatchType::Fuzzy
                };
                (score, label)
            }
            Strategy::Contains => {
                let score = contains_score(ctx.input, ctx.candidate)?;
                (score, MatchType::for_score(score))
            }
            Strategy::WordOverlap => {
                let score = word_overlap_score(ctx.input, ctx.candidate)?;
                (score, MatchType::for_score(score))
            }
            Strategy::Character => {
                let score = similarity(ctx.input, ctx.candidate);
                if score == 0 {
                    return None;
                }
                (score, MatchType::for_score(score))
            }
        };
        Some(StrategyScore {
            score,
            match_type,
            strategy: *self,
        })
    }
}

/// Inputs shared by every strategy for one comparison.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext<'a> {
    /// Normalized search term.
    pub input: &'a str,
    /// Normalized candidate name field.
    pub candidate: &'a str,
    pub field_type: Option<FieldType>,
    /// Canonical fragment the input is an alias of, if any.
    pub alias_target: Option<&'a str>,
    pub patterns: Option<&'a PatternBook>,
}

/// Result of a single strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyScore {
    pub score: u8,
    pub match_type: MatchType,
    pub strategy: Strategy,
}

/// Best score of a candidate for a field-aware query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldScore {
    /// Final similarity (0 to 100).
    pub similarity: u8,
    pub match_type: MatchType,
    /// Strategy that produced the score.
    pub strategy: Strategy,
    /// Candidate name the score was computed against.
    pub field: NameField,
}

impl FieldScore {
    fn none() -> Self {
        Self {
            similarity: 0,
            match_type: MatchType::Fuzzy,
            strategy: Strategy::Character,
            field: NameField::Name,
        }
    }

    fn from_strategy(score: StrategyScore, field: NameField) -> Self {
        Self {
            similarity: score.score,
            match_type: score.match_type,
            strategy: score.strategy,
            field,
        }
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        format!(
            "{}: {}% via {} ({})",
            self.match_type,
            self.similarity,
            self.strategy.name(),
            self.field.as_str()
        )
    }
}

/// Composite scorer over exact, alias, pattern, containment, word-overlap
/// and character strategies.
#[derive(Debug, Clone)]
pub struct MultiStrategyScorer {
    aliases: AliasRegistry,
    patterns: PatternBook,
}

impl Default for MultiStrategyScorer {
    fn default() -> Self {
        Self::new(
            AliasRegistry::builtin().clone(),
            PatternBook::builtin().clone(),
        )
    }
}

impl MultiStrategyScorer {
    pub fn new(aliases: AliasRegistry, patterns: PatternBook) -> Self {
        Self { aliases, patterns }
    }

    pub fn aliases(&self) -> &AliasRegistry {
        &self.aliases
    }

    pub fn patterns(&self) -> &PatternBook {
        &self.patterns
    }

    /// Field-agnostic composite score of `input` against `candidate_name`.
    ///
    /// Uses the strategies that need no field type: exact, contains, word
    /// overlap and character similarity.
    pub fn score(&self, input: &str, candidate_name: &str) -> u8 {
        let input = normalize_text(input);
        let candidate = normalize_text(candidate_name);
        if input.is_empty() || candidate.is_empty() {
            return 0;
        }
        let ctx = StrategyContext {
            input: &input,
            candidate: &candidate,
            field_type: None,
            alias_target: None,
            patterns: None,
        };
        [
            Strategy::Exact,
            Strategy::Contains,
            Strategy::WordOverlap,
            Strategy::Character,
        ]
        .iter()
        .filter_map(|strategy| strategy.evaluate(&ctx))
        .map(|s| s.score)
        .max()
        .unwrap_or(0)
    }

    /// Best score of `input` against any of the candidate's names.
    ///
    /// Exact and alias matches are checked first over every name field and
    /// returned immediately. Otherwise the remaining strategies run against
    /// each name field independently and the single best result is kept.
    pub fn score_field(
        &self,
        input: &str,
        candidate: &CandidateRecord,
        field_type: FieldType,
    ) -> FieldScore {
        let input = normalize_text(input);
        if input.is_empty() {
            return FieldScore::none();
        }
        let fields: Vec<(NameField, String)> = candidate
            .name_fields()
            .map(|(field, value)| (field, normalize_text(value)))
            .collect();
        let alias_target = self.aliases.lookup(field_type, &input);

        for strategy in Strategy::PRECISE {
            for (field, text) in &fields {
                let ctx = StrategyContext {
                    input: &input,
                    candidate: text,
                    field_type: Some(field_type),
                    alias_target,
                    patterns: Some(&self.patterns),
                };
                if let Some(score) = strategy.evaluate(&ctx) {
                    return FieldScore::from_strategy(score, *field);
                }
            }
        }

        let mut best: Option<FieldScore> = None;
        for (field, text) in &fields {
            let ctx = StrategyContext {
                input: &input,
                candidate: text,
                field_type: Some(field_type),
                alias_target,
                patterns: Some(&self.patterns),
            };
            for strategy in Strategy::FALLBACK {
                let Some(score) = strategy.evaluate(&ctx) else {
                    continue;
                };
                if best.is_none_or(|b| score.score > b.similarity) {
                    best = Some(FieldScore::from_strategy(score, *field));
                }
            }
        }
        best.unwrap_or_else(FieldScore::none)
    }
}

fn exact_score(input: &str, candidate: &str) -> Option<u8> {
    (input == candidate).then_some(EXACT_SCORE)
}

/// The target may sit anywhere in the candidate name. The reverse direction
/// needs whole words, so a short code such as "ma" never hits inside "taman".
fn alias_score(target: &str, candidate: &str) -> Option<u8> {
    (candidate.contains(target) || contains_words(target, candidate)).then_some(ALIAS_SCORE)
}

fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {haystack} ").contains(&format!(" {needle} "))
}

/// Containment score: the shorter string must occur inside the longer one.
///
/// Two- and three-character substrings are weak evidence and are weighted
/// down.
pub fn contains_score(a: &str, b: &str) -> Option<u8> {
    let (short, long) = if char_len(a) <= char_len(b) {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = char_len(short);
    if short_len < CONTAINS_MIN_LEN || !long.contains(short) {
        return None;
    }
    let ratio = short_len as f64 / char_len(long) as f64;
    let weight = if short_len >= CONTAINS_FULL_WEIGHT_LEN {
        CONTAINS_WEIGHT
    } else {
        CONTAINS_SHORT_WEIGHT
    };
    Some(to_score(ratio * weight))
}

/// Word overlap score of `input` words found in `candidate`.
///
/// A word matches exactly or when its character similarity with some
/// candidate word exceeds 80.
pub fn word_overlap_score(input: &str, candidate: &str) -> Option<u8> {
    let input_words: Vec<&str> = input.split_whitespace().collect();
    let candidate_words: Vec<&str> = candidate.split_whitespace().collect();
    if input_words.is_empty() || candidate_words.is_empty() {
        return None;
    }
    if let [word] = input_words.as_slice()
        && candidate_words.contains(word)
    {
        return Some(SINGLE_WORD_HIT_SCORE);
    }

    let mut matched = 0usize;
    let mut exact = 0usize;
    for word in &input_words {
        if candidate_words.contains(word) {
            matched += 1;
            exact += 1;
        } else if candidate_words
            .iter()
            .any(|other| similarity(word, other) > WORD_SIMILARITY_MIN)
        {
            matched += 1;
        }
    }
    if matched == 0 {
        return None;
    }

    let total = input_words.len() as f64;
    let base = if matched == input_words.len() {
        WORD_PERFECT_WEIGHT
    } else {
        WORD_PARTIAL_WEIGHT
    };
    let raw = matched as f64 / total * base + exact as f64 / total * WORD_EXACT_BONUS;
    Some(to_score(raw).min(WORD_SCORE_CAP))
}
