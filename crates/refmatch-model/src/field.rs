//! Field types and match output records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::candidate::CandidateRecord;

/// Kind of reference data a value is matched against.
///
/// Selects the alias table and the prefix/suffix lists that apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Provinces,
    Cities,
    Subjects,
    Banks,
    Categories,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Provinces,
        FieldType::Cities,
        FieldType::Subjects,
        FieldType::Banks,
        FieldType::Categories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Provinces => "provinces",
            FieldType::Cities => "cities",
            FieldType::Subjects => "subjects",
            FieldType::Banks => "banks",
            FieldType::Categories => "categories",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        FieldType::ALL
            .into_iter()
            .find(|field| field.as_str() == lowered)
            .ok_or_else(|| format!("unknown field type: {s}"))
    }
}

/// Advisory label for the strategy that produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Alias,
    Partial,
    Fuzzy,
}

impl MatchType {
    /// Label for a score produced by a non-exact, non-alias strategy.
    pub fn for_score(score: u8) -> Self {
        if score > 85 {
            MatchType::Partial
        } else {
            MatchType::Fuzzy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Alias => "alias",
            MatchType::Partial => "partial",
            MatchType::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One surviving candidate for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMatch {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
    /// Confidence score, 0 to 100.
    pub similarity: u8,
    pub match_type: MatchType,
}

impl FieldMatch {
    pub fn from_candidate(candidate: &CandidateRecord, similarity: u8, match_type: MatchType) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            local_name: candidate.local_name.clone(),
            alternate_name: candidate.alternate_name.clone(),
            similarity: similarity.min(100),
            match_type,
        }
    }
}
