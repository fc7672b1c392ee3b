pub mod candidate;
pub mod decision;
pub mod error;
pub mod field;

pub use candidate::{CandidateRecord, NameField, null_as_empty};
pub use decision::{Decision, DecisionTier};
pub use error::MatchIssue;
pub use field::{FieldMatch, FieldType, MatchType};
