//! Decision tiers for a ranked match list.

use refmatch_model::{Decision, FieldMatch, MatchType};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Configurable boundaries between decision tiers.
///
/// - `auto_accept` and above, exact: [`Decision::AutoAccept`]
/// - `auto_correct` and above: [`Decision::AutoCorrected`]
/// - `smart_accept` and above with a clear lead: [`Decision::SmartAutoAccept`]
/// - `best_guess` and above: [`Decision::BestGuess`]
/// - below `best_guess`: [`Decision::Reject`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    /// Minimum similarity for a verbatim accept (default: 95).
    pub auto_accept: u8,
    /// Minimum similarity for an accept-with-correction (default: 85).
    pub auto_correct: u8,
    /// Minimum similarity for a clear-winner accept (default: 60).
    pub smart_accept: u8,
    /// Minimum similarity for a reviewable suggestion (default: 50).
    pub best_guess: u8,
    /// Lead over the runner-up a clear winner needs, exclusive (default: 10).
    pub clear_winner_margin: u8,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            auto_accept: 95,
            auto_correct: 85,
            smart_accept: 60,
            best_guess: 50,
            clear_winner_margin: 10,
        }
    }
}

impl ConfidenceThresholds {
    /// Thresholds that send more rows to manual review.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            auto_accept: 95,
            auto_correct: 90,
            smart_accept: 70,
            best_guess: 60,
            clear_winner_margin: 15,
        }
    }

    /// Thresholds for exploratory imports where review is cheap.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            auto_accept: 95,
            auto_correct: 80,
            smart_accept: 55,
            best_guess: 50,
            clear_winner_margin: 5,
        }
    }

    /// Checks the tiers are ordered and within 0 to 100.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.auto_accept <= 100
            && self.auto_correct <= self.auto_accept
            && self.smart_accept <= self.auto_correct
            && self.best_guess <= self.smart_accept;
        if !ordered {
            return Err(ConfigError::InvalidThresholds {
                message: format!(
                    "expected 100 >= auto_accept ({}) >= auto_correct ({}) >= smart_accept ({}) >= best_guess ({})",
                    self.auto_accept, self.auto_correct, self.smart_accept, self.best_guess
                ),
            });
        }
        if self.clear_winner_margin > 100 {
            return Err(ConfigError::InvalidThresholds {
                message: format!(
                    "clear_winner_margin must be at most 100, got {}",
                    self.clear_winner_margin
                ),
            });
        }
        Ok(())
    }

    /// Classifies a match list sorted by descending similarity.
    ///
    /// Only the top two entries are consulted. A moderate top score is
    /// auto-accepted only when it is alone or leads the runner-up by more
    /// than `clear_winner_margin`; near-ties fall back to a best guess.
    pub fn classify(&self, matches: &[FieldMatch]) -> Decision {
        let Some(top) = matches.first() else {
            return Decision::Reject;
        };
        let score = top.similarity;
        if score >= self.auto_accept && top.match_type == MatchType::Exact {
            return Decision::AutoAccept(top.clone());
        }
        if score >= self.auto_correct {
            return Decision::AutoCorrected(top.clone());
        }
        if score >= self.smart_accept && self.is_clear_winner(top, matches.get(1)) {
            return Decision::SmartAutoAccept(top.clone());
        }
        if score >= self.best_guess {
            return Decision::BestGuess(top.clone());
        }
        Decision::Reject
    }

    fn is_clear_winner(&self, top: &FieldMatch, runner_up: Option<&FieldMatch>) -> bool {
        runner_up.is_none_or(|second| {
            top.similarity.saturating_sub(second.similarity) > self.clear_winner_margin
        })
    }
}

/// Classifies with the default thresholds.
pub fn classify(matches: &[FieldMatch]) -> Decision {
    ConfidenceThresholds::default().classify(matches)
}

/// Classifies with explicit thresholds.
pub fn classify_with(matches: &[FieldMatch], thresholds: &ConfidenceThresholds) -> Decision {
    thresholds.classify(matches)
}

#[cfg(test)]
mod tests {
    use refmatch_model::{CandidateRecord, DecisionTier};

    use super::*;

    fn ranked(scores: &[(u8, MatchType)]) -> Vec<FieldMatch> {
        scores
            .iter()
            .enumerate()
            .map(|(idx, (score, match_type))| {
                let record = CandidateRecord::new(format!("c-{idx}"), format!("Candidate {idx}"));
                FieldMatch::from_candidate(&record, *score, *match_type)
            })
            .collect()
    }

    fn fuzzy(scores: &[u8]) -> Vec<FieldMatch> {
        let tagged: Vec<_> = scores.iter().map(|s| (*s, MatchType::Fuzzy)).collect();
        ranked(&tagged)
    }

    #[test]
    fn empty_list_rejects() {
        assert_eq!(classify(&[]), Decision::Reject);
    }

    #[test]
    fn exact_top_auto_accepts() {
        let matches = ranked(&[(100, MatchType::Exact), (95, MatchType::Alias)]);
        assert_eq!(classify(&matches).tier(), DecisionTier::AutoAccept);
    }

    #[test]
    fn rewritten_95_is_a_correction() {
        let matches = ranked(&[(95, MatchType::Alias)]);
        assert_eq!(classify(&matches).tier(), DecisionTier::AutoCorrected);
        let matches = ranked(&[(95, MatchType::Partial)]);
        assert_eq!(classify(&matches).tier(), DecisionTier::AutoCorrected);
    }

    #[test]
    fn high_confidence_corrects_regardless_of_runner_up() {
        let matches = ranked(&[(88, MatchType::Partial), (87, MatchType::Partial)]);
        assert_eq!(classify(&matches).tier(), DecisionTier::AutoCorrected);
    }

    #[test]
    fn clear_winner_smart_accepts() {
        let decision = classify(&fuzzy(&[72, 55]));
        assert_eq!(decision.tier(), DecisionTier::SmartAutoAccept);
        assert_eq!(decision.chosen().map(|m| m.id.as_str()), Some("c-0"));
    }

    #[test]
    fn sole_moderate_match_smart_accepts() {
        assert_eq!(
            classify(&fuzzy(&[65])).tier(),
            DecisionTier::SmartAutoAccept
        );
    }

    #[test]
    fn near_tie_is_only_a_best_guess() {
        assert_eq!(classify(&fuzzy(&[72, 68])).tier(), DecisionTier::BestGuess);
        // margin is exclusive
        assert_eq!(classify(&fuzzy(&[70, 60])).tier(), DecisionTier::BestGuess);
    }

    #[test]
    fn low_scores_best_guess_then_reject() {
        assert_eq!(classify(&fuzzy(&[55])).tier(), DecisionTier::BestGuess);
        assert_eq!(classify(&fuzzy(&[45])).tier(), DecisionTier::Reject);
    }

    #[test]
    fn classification_does_not_mutate_input() {
        let matches = fuzzy(&[72, 55]);
        let before = matches.clone();
        let _ = classify(&matches);
        assert_eq!(matches, before);
    }

    #[test]
    fn custom_thresholds_shift_tiers() {
        let matches = fuzzy(&[82, 60]);
        assert_eq!(classify(&matches).tier(), DecisionTier::SmartAutoAccept);
        assert_eq!(
            classify_with(&matches, &ConfidenceThresholds::relaxed()).tier(),
            DecisionTier::AutoCorrected
        );
        assert_eq!(
            classify_with(&matches, &ConfidenceThresholds::strict()).tier(),
            DecisionTier::SmartAutoAccept
        );
    }

    #[test]
    fn validate_rejects_unordered_tiers() {
        assert!(ConfidenceThresholds::default().validate().is_ok());
        assert!(ConfidenceThresholds::strict().validate().is_ok());
        let broken = ConfidenceThresholds {
            smart_accept: 90,
            ..ConfidenceThresholds::default()
        };
        assert!(matches!(
            broken.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }
}
