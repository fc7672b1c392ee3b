//! JSON inputs: candidate lists and value lists.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use refmatch_model::CandidateRecord;
use tracing::{debug, warn};

/// Loads a JSON array of candidate records.
///
/// Records without a usable name are kept; the matcher skips them and logs
/// each one, so the count reported here is the count in the file.
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read candidates {}", path.display()))?;
    let candidates: Vec<CandidateRecord> = serde_json::from_str(&text)
        .with_context(|| format!("parse candidates {}", path.display()))?;
    let unnamed = candidates
        .iter()
        .filter(|c| c.validate().is_err())
        .count();
    if unnamed > 0 {
        warn!(path = %path.display(), unnamed, "Candidate file contains records without a name");
    }
    debug!(path = %path.display(), count = candidates.len(), "Loaded candidates");
    Ok(candidates)
}

/// Loads a JSON array of strings to resolve.
///
/// `null` entries become blank values, which the matcher rejects one by one.
pub fn load_terms(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read values {}", path.display()))?;
    let terms: Vec<Option<String>> = serde_json::from_str(&text)
        .with_context(|| format!("parse values {}", path.display()))?;
    let terms: Vec<String> = terms.into_iter().map(Option::unwrap_or_default).collect();
    debug!(path = %path.display(), count = terms.len(), "Loaded values");
    Ok(terms)
}
