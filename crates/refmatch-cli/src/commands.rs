use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use refmatch_map::{BatchResult, FieldMatcher, FieldScore, MatcherConfig, Resolution};
use refmatch_map::{distance, similarity};
use refmatch_model::{CandidateRecord, FieldType};

use refmatch_cli::input::{load_candidates, load_terms};
use refmatch_cli::logging::redact_value;

use crate::cli::{AliasesArgs, BatchArgs, MatchArgs, ScoreArgs};

/// Scores for one pair of strings.
pub struct ScoreReport {
    pub distance: usize,
    pub similarity: u8,
    pub composite: u8,
    pub field_score: Option<(FieldType, FieldScore)>,
}

/// Alias table of one field type.
pub struct AliasListing {
    pub field_type: FieldType,
    pub entries: Vec<(String, String)>,
}

/// Builds the matcher from `--config`, or the built-in defaults.
pub fn build_matcher(config_path: Option<&Path>) -> Result<FieldMatcher> {
    let Some(path) = config_path else {
        debug!("Using built-in matcher configuration");
        return Ok(FieldMatcher::default());
    };
    let config = MatcherConfig::load(path)?;
    let matcher = FieldMatcher::from_config(&config)
        .with_context(|| format!("apply config {}", path.display()))?;
    info!(
        path = %path.display(),
        min_similarity = matcher.min_similarity(),
        "Loaded matcher configuration"
    );
    Ok(matcher)
}

pub fn run_match(matcher: &FieldMatcher, args: &MatchArgs) -> Result<Vec<Resolution>> {
    let field_type = FieldType::from(args.field);
    let span = info_span!("match", field_type = %field_type);
    let _guard = span.enter();
    let candidates = load_candidates(&args.candidates)?;
    let resolutions: Vec<Resolution> = args
        .values
        .iter()
        .map(|value| {
            let resolution = matcher.resolve(value, &candidates, field_type);
            debug!(
                value = redact_value(value),
                tier = %resolution.decision.tier(),
                matched = resolution.matches.len(),
                "Resolved value"
            );
            resolution
        })
        .collect();
    Ok(resolutions)
}

pub fn run_batch(matcher: &FieldMatcher, args: &BatchArgs) -> Result<BatchResult> {
    let field_type = FieldType::from(args.field);
    let span = info_span!("batch", field_type = %field_type);
    let _guard = span.enter();
    let candidates = load_candidates(&args.candidates)?;
    let terms = load_terms(&args.terms)?;
    let result = matcher.resolve_batch(&terms, &candidates, field_type);
    info!(
        values = result.resolutions.len(),
        candidates = candidates.len(),
        review = result.needs_review().len(),
        "Batch resolved"
    );
    Ok(result)
}

pub fn run_score(matcher: &FieldMatcher, args: &ScoreArgs) -> ScoreReport {
    let field_score = args.field.map(|field| {
        let field_type = FieldType::from(field);
        let candidate = CandidateRecord::new("-", args.right.as_str());
        (
            field_type,
            matcher
                .scorer()
                .score_field(&args.left, &candidate, field_type),
        )
    });
    ScoreReport {
        distance: distance(&args.left, &args.right),
        similarity: similarity(&args.left, &args.right),
        composite: matcher.scorer().score(&args.left, &args.right),
        field_score,
    }
}

pub fn run_aliases(matcher: &FieldMatcher, args: &AliasesArgs) -> Vec<AliasListing> {
    let fields: Vec<FieldType> = match args.field {
        Some(field) => vec![FieldType::from(field)],
        None => FieldType::ALL.to_vec(),
    };
    let aliases = matcher.scorer().aliases();
    fields
        .into_iter()
        .map(|field_type| AliasListing {
            field_type,
            entries: aliases
                .entries(field_type)
                .map(|(alias, target)| (alias.to_string(), target.to_string()))
                .collect(),
        })
        .collect()
}
