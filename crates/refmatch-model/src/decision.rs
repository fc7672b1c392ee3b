//! Accept/reject decisions derived from a ranked match list.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::FieldMatch;

/// Outcome of classifying a ranked match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", content = "match", rename_all = "snake_case")]
pub enum Decision {
    /// Verbatim hit; import without review.
    AutoAccept(FieldMatch),
    /// High-confidence hit that needed rewriting (alias, boilerplate).
    AutoCorrected(FieldMatch),
    /// Moderate confidence with a clear lead over the runner-up.
    SmartAutoAccept(FieldMatch),
    /// Weak or ambiguous; surface to a reviewer with a suggestion.
    BestGuess(FieldMatch),
    /// Nothing usable.
    Reject,
}

impl Decision {
    pub fn tier(&self) -> DecisionTier {
        match self {
            Decision::AutoAccept(_) => DecisionTier::AutoAccept,
            Decision::AutoCorrected(_) => DecisionTier::AutoCorrected,
            Decision::SmartAutoAccept(_) => DecisionTier::SmartAutoAccept,
            Decision::BestGuess(_) => DecisionTier::BestGuess,
            Decision::Reject => DecisionTier::Reject,
        }
    }

    /// The candidate the decision settled on, if any.
    pub fn chosen(&self) -> Option<&FieldMatch> {
        match self {
            Decision::AutoAccept(m)
            | Decision::AutoCorrected(m)
            | Decision::SmartAutoAccept(m)
            | Decision::BestGuess(m) => Some(m),
            Decision::Reject => None,
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.tier().is_automatic()
    }

    pub fn needs_review(&self) -> bool {
        !self.is_automatic()
    }
}

/// Tier tag of a [`Decision`], ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionTier {
    Reject,
    BestGuess,
    SmartAutoAccept,
    AutoCorrected,
    AutoAccept,
}

impl DecisionTier {
    pub const ALL: [DecisionTier; 5] = [
        DecisionTier::AutoAccept,
        DecisionTier::AutoCorrected,
        DecisionTier::SmartAutoAccept,
        DecisionTier::BestGuess,
        DecisionTier::Reject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionTier::AutoAccept => "auto_accept",
            DecisionTier::AutoCorrected => "auto_corrected",
            DecisionTier::SmartAutoAccept => "smart_auto_accept",
            DecisionTier::BestGuess => "best_guess",
            DecisionTier::Reject => "reject",
        }
    }

    /// Returns a human-readable description of the tier.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            DecisionTier::AutoAccept => "exact match - imported as is",
            DecisionTier::AutoCorrected => "high confidence - imported with correction",
            DecisionTier::SmartAutoAccept => "clear winner - imported as best match",
            DecisionTier::BestGuess => "weak or ambiguous - needs review",
            DecisionTier::Reject => "no usable match - needs manual entry",
        }
    }

    pub fn is_automatic(&self) -> bool {
        matches!(
            self,
            DecisionTier::AutoAccept | DecisionTier::AutoCorrected | DecisionTier::SmartAutoAccept
        )
    }
}

impl fmt::Display for DecisionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
