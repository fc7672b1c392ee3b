//! Canonical reference records supplied by the caller.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MatchIssue;

/// An authoritative reference entry (bank, city, subject, ...).
///
/// Read-only to the matcher. `name` defaults to empty when absent so that a
/// single malformed record can be skipped instead of failing a whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// Opaque stable identifier.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// Canonical display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Secondary canonical name (localized or official form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    /// Tertiary canonical name (code or abbreviation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
}

impl CandidateRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            local_name: None,
            alternate_name: None,
        }
    }

    #[must_use]
    pub fn with_local_name(mut self, local_name: impl Into<String>) -> Self {
        self.local_name = Some(local_name.into());
        self
    }

    #[must_use]
    pub fn with_alternate_name(mut self, alternate_name: impl Into<String>) -> Self {
        self.alternate_name = Some(alternate_name.into());
        self
    }

    /// Fails when the record has no usable `name`.
    pub fn validate(&self) -> Result<(), MatchIssue> {
        if self.name.trim().is_empty() {
            return Err(MatchIssue::MalformedCandidate {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Non-blank name fields in priority order: name, local, alternate.
    pub fn name_fields(&self) -> impl Iterator<Item = (NameField, &str)> {
        [
            (NameField::Name, Some(self.name.as_str())),
            (NameField::LocalName, self.local_name.as_deref()),
            (NameField::AlternateName, self.alternate_name.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (field, v))
        })
    }
}

/// Reads a string that may be `null`, mapping `null` to empty.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which of a candidate's names produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameField {
    Name,
    LocalName,
    AlternateName,
}

impl NameField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameField::Name => "name",
            NameField::LocalName => "local_name",
            NameField::AlternateName => "alternate_name",
        }
    }
}
