use thiserror::Error;

/// Recoverable anomalies observed while matching.
///
/// The matcher never returns these to its caller; it logs them and degrades
/// to an empty result or a skipped candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchIssue {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("candidate '{id}' has no name")]
    MalformedCandidate { id: String },
}

impl MatchIssue {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
