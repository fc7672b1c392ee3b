//! Field matching engine: ranks a candidate list for one free-text value.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use refmatch_model::{CandidateRecord, Decision, DecisionTier, FieldMatch, FieldType, MatchIssue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ConfigError, DEFAULT_MIN_SIMILARITY, MatcherConfig};
use crate::confidence::ConfidenceThresholds;
use crate::score::MultiStrategyScorer;

static DEFAULT_MATCHER: LazyLock<FieldMatcher> = LazyLock::new(FieldMatcher::default);

/// Matches free-text import values against canonical reference records.
///
/// Stateless per call and `Sync`: one instance can serve any number of
/// concurrent queries.
///
/// # Example
///
/// ```ignore
/// use refmatch_map::FieldMatcher;
/// use refmatch_model::{CandidateRecord, FieldType};
///
/// let matcher = FieldMatcher::default();
/// let cities = vec![CandidateRecord::new("c-1", "Bandung")];
/// let matches = matcher.find_matches("bdg", &cities, FieldType::Cities);
/// ```
#[derive(Debug, Clone)]
pub struct FieldMatcher {
    scorer: MultiStrategyScorer,
    min_similarity: u8,
    thresholds: ConfidenceThresholds,
}

impl Default for FieldMatcher {
    fn default() -> Self {
        Self::new(
            MultiStrategyScorer::default(),
            DEFAULT_MIN_SIMILARITY,
            ConfidenceThresholds::default(),
        )
    }
}

impl FieldMatcher {
    pub fn new(
        scorer: MultiStrategyScorer,
        min_similarity: u8,
        thresholds: ConfidenceThresholds,
    ) -> Self {
        Self {
            scorer,
            min_similarity,
            thresholds,
        }
    }

    /// Builds a matcher from a validated configuration.
    pub fn from_config(config: &MatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let scorer = MultiStrategyScorer::new(config.alias_registry(), config.pattern_book());
        Ok(Self::new(scorer, config.min_similarity, config.thresholds))
    }

    pub fn scorer(&self) -> &MultiStrategyScorer {
        &self.scorer
    }

    pub fn thresholds(&self) -> &ConfidenceThresholds {
        &self.thresholds
    }

    pub fn min_similarity(&self) -> u8 {
        self.min_similarity
    }

    /// Ranks `candidates` for `search_term`.
    ///
    /// Returns candidates scoring strictly above the similarity floor,
    /// sorted by descending similarity; equal scores keep input order.
    /// A blank term or an empty candidate list yields an empty result, and
    /// candidates without a name are skipped. Neither aborts the call.
    pub fn find_matches(
        &self,
        search_term: &str,
        candidates: &[CandidateRecord],
        field_type: FieldType,
    ) -> Vec<FieldMatch> {
        if let Err(issue) = validate_search_term(search_term) {
            warn!(field_type = %field_type, %issue, "Skipping match for blank search term");
            return Vec::new();
        }
        if candidates.is_empty() {
            debug!(field_type = %field_type, "No candidates to match against");
            return Vec::new();
        }

        let mut skipped = 0usize;
        let mut matches = Vec::new();
        for candidate in candidates {
            if let Err(issue) = candidate.validate() {
                skipped += 1;
                warn!(field_type = %field_type, %issue, "Skipping malformed candidate");
                continue;
            }
            let score = self.scorer.score_field(search_term, candidate, field_type);
            if score.similarity > self.min_similarity {
                matches.push(FieldMatch::from_candidate(
                    candidate,
                    score.similarity,
                    score.match_type,
                ));
            }
        }

        matches.sort_by(|a, b| b.similarity.cmp(&a.similarity));

        debug!(
            field_type = %field_type,
            candidates = candidates.len(),
            skipped,
            matched = matches.len(),
            top = matches.first().map(|m| m.similarity),
            "Ranked candidates"
        );
        matches
    }

    /// Classifies an already ranked list with this matcher's thresholds.
    pub fn classify(&self, matches: &[FieldMatch]) -> Decision {
        self.thresholds.classify(matches)
    }

    /// Ranks and classifies in one step.
    pub fn resolve(
        &self,
        search_term: &str,
        candidates: &[CandidateRecord],
        field_type: FieldType,
    ) -> Resolution {
        let matches = self.find_matches(search_term, candidates, field_type);
        let decision = self.classify(&matches);
        Resolution {
            search_term: search_term.to_string(),
            field_type,
            matches,
            decision,
        }
    }

    /// Resolves many values of one field against the same candidate list.
    pub fn resolve_batch<S>(
        &self,
        search_terms: &[S],
        candidates: &[CandidateRecord],
        field_type: FieldType,
    ) -> BatchResult
    where
        S: AsRef<str>,
    {
        let resolutions = search_terms
            .iter()
            .map(|term| self.resolve(term.as_ref(), candidates, field_type))
            .collect();
        BatchResult { resolutions }
    }
}

fn validate_search_term(search_term: &str) -> Result<(), MatchIssue> {
    if search_term.trim().is_empty() {
        return Err(MatchIssue::invalid_input("search term is blank"));
    }
    Ok(())
}

/// Ranked matches and the decision for one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub search_term: String,
    pub field_type: FieldType,
    pub matches: Vec<FieldMatch>,
    pub decision: Decision,
}

/// Resolutions for a batch of values, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub resolutions: Vec<Resolution>,
}

impl BatchResult {
    /// Returns the count of resolutions in each decision tier.
    #[must_use]
    pub fn count_by_tier(&self) -> BTreeMap<DecisionTier, usize> {
        let mut counts = BTreeMap::new();
        for resolution in &self.resolutions {
            *counts.entry(resolution.decision.tier()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns resolutions grouped by their decision tier.
    #[must_use]
    pub fn group_by_tier(&self) -> BTreeMap<DecisionTier, Vec<&Resolution>> {
        let mut groups: BTreeMap<DecisionTier, Vec<&Resolution>> = BTreeMap::new();
        for resolution in &self.resolutions {
            groups
                .entry(resolution.decision.tier())
                .or_default()
                .push(resolution);
        }
        groups
    }

    /// Resolutions a human has to look at (best guesses and rejects).
    #[must_use]
    pub fn needs_review(&self) -> Vec<&Resolution> {
        self.resolutions
            .iter()
            .filter(|r| r.decision.needs_review())
            .collect()
    }

    /// Returns true if every value was resolved without review.
    #[must_use]
    pub fn all_automatic(&self) -> bool {
        !self.resolutions.is_empty() && self.resolutions.iter().all(|r| r.decision.is_automatic())
    }
}

/// Ranks candidates with the default matcher.
pub fn find_matches(
    search_term: &str,
    candidates: &[CandidateRecord],
    field_type: FieldType,
) -> Vec<FieldMatch> {
    DEFAULT_MATCHER.find_matches(search_term, candidates, field_type)
}

pub fn find_province_matches(search_term: &str, candidates: &[CandidateRecord]) -> Vec<FieldMatch> {
    find_matches(search_term, candidates, FieldType::Provinces)
}

pub fn find_city_matches(search_term: &str, candidates: &[CandidateRecord]) -> Vec<FieldMatch> {
    find_matches(search_term, candidates, FieldType::Cities)
}

pub fn find_subject_matches(search_term: &str, candidates: &[CandidateRecord]) -> Vec<FieldMatch> {
    find_matches(search_term, candidates, FieldType::Subjects)
}

pub fn find_bank_matches(search_term: &str, candidates: &[CandidateRecord]) -> Vec<FieldMatch> {
    find_matches(search_term, candidates, FieldType::Banks)
}

pub fn find_category_matches(search_term: &str, candidates: &[CandidateRecord]) -> Vec<FieldMatch> {
    find_matches(search_term, candidates, FieldType::Categories)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use refmatch_model::MatchType;

    use super::*;

    fn cities() -> Vec<CandidateRecord> {
        vec![
            CandidateRecord::new("c-1", "Kota Yogyakarta"),
            CandidateRecord::new("c-2", "Kabupaten Sleman"),
            CandidateRecord::new("c-3", "Kota Bandung"),
            CandidateRecord::new("c-4", "Kabupaten Bandung"),
        ]
    }

    #[test]
    fn blank_term_yields_nothing() {
        let matcher = FieldMatcher::default();
        assert!(matcher.find_matches("   ", &cities(), FieldType::Cities).is_empty());
        assert!(matcher.find_matches("", &cities(), FieldType::Cities).is_empty());
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let matcher = FieldMatcher::default();
        assert!(matcher.find_matches("bandung", &[], FieldType::Cities).is_empty());
    }

    #[test]
    fn malformed_candidates_are_skipped() {
        let mut candidates = cities();
        candidates.insert(0, CandidateRecord::new("bad", "  "));
        let matches = FieldMatcher::default().find_matches("Sleman", &candidates, FieldType::Cities);
        assert_eq!(matches.first().map(|m| m.id.as_str()), Some("c-2"));
        assert!(matches.iter().all(|m| m.id != "bad"));
    }

    #[test]
    fn ties_keep_candidate_order() {
        let matches = FieldMatcher::default().find_matches("bdg", &cities(), FieldType::Cities);
        let ids: Vec<_> = matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c-3", "c-4"]);
        assert!(matches.iter().all(|m| m.match_type == MatchType::Alias));
    }

    #[test]
    fn floor_is_exclusive() {
        let strict_floor = FieldMatcher::new(
            MultiStrategyScorer::default(),
            95,
            ConfidenceThresholds::default(),
        );
        let matches = strict_floor.find_matches("Sleman", &cities(), FieldType::Cities);
        assert!(matches.is_empty());
    }

    #[test]
    fn resolve_batch_counts_tiers() {
        let matcher = FieldMatcher::default();
        let batch = matcher.resolve_batch(
            &["Kota Bandung", "jogja", "zzzz"],
            &cities(),
            FieldType::Cities,
        );
        let counts = batch.count_by_tier();
        assert_eq!(counts.get(&DecisionTier::AutoAccept), Some(&1));
        assert_eq!(counts.get(&DecisionTier::AutoCorrected), Some(&1));
        assert_eq!(counts.get(&DecisionTier::Reject), Some(&1));
        assert_eq!(batch.needs_review().len(), 1);
        assert!(!batch.all_automatic());
        assert_eq!(batch.resolutions[2].search_term, "zzzz");
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_warnings<T>(run: impl FnOnce() -> T) -> (T, String) {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, run);
        let bytes = log.0.lock().expect("log buffer").clone();
        (result, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[test]
    fn blank_term_is_logged_as_warning() {
        let matcher = FieldMatcher::default();
        let (matches, output) =
            capture_warnings(|| matcher.find_matches("  ", &cities(), FieldType::Cities));
        assert!(matches.is_empty());
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Skipping match for blank search term"), "{output}");
        assert!(output.contains("field_type=cities"), "{output}");
    }

    #[test]
    fn nameless_candidate_is_logged_as_warning() {
        let mut candidates = cities();
        candidates.push(CandidateRecord::new("c-9", ""));
        let matcher = FieldMatcher::default();
        let (matches, output) =
            capture_warnings(|| matcher.find_matches("Sleman", &candidates, FieldType::Cities));
        assert!(!matches.is_empty());
        assert!(output.contains("Skipping malformed candidate"), "{output}");
        assert!(output.contains("c-9"), "{output}");
    }

    #[test]
    fn well_formed_query_logs_no_warning() {
        let matcher = FieldMatcher::default();
        let (_, output) =
            capture_warnings(|| matcher.find_matches("Sleman", &cities(), FieldType::Cities));
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn matcher_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldMatcher>();
    }
}
