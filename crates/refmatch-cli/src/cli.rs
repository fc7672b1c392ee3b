//! CLI argument definitions for the reference matcher.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use refmatch_model::FieldType;

#[derive(Parser)]
#[command(
    name = "refmatch",
    version,
    about = "Match free-text import values against canonical reference records",
    long_about = "Match free-text spreadsheet values (bank, city, subject names, ...)\n\
                  against a list of canonical reference records.\n\n\
                  Each value is ranked with exact, alias, boilerplate-stripping and\n\
                  fuzzy strategies, then classified into an accept/reject tier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Matcher configuration file (TOML) with thresholds and extra aliases.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw import values in log output (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank candidates for one or more values and show the decision.
    Match(MatchArgs),

    /// Resolve a JSON list of values and summarize decision tiers.
    Batch(BatchArgs),

    /// Show edit distance and similarity scores for two strings.
    Score(ScoreArgs),

    /// List the alias tables.
    Aliases(AliasesArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Field type the values belong to.
    #[arg(long = "field", value_enum)]
    pub field: FieldTypeArg,

    /// JSON file with an array of candidate records.
    #[arg(long = "candidates", value_name = "FILE")]
    pub candidates: PathBuf,

    /// Maximum number of ranked matches shown per value.
    #[arg(long = "limit", default_value_t = 5)]
    pub limit: usize,

    /// Print resolutions as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Values to match.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Field type the values belong to.
    #[arg(long = "field", value_enum)]
    pub field: FieldTypeArg,

    /// JSON file with an array of candidate records.
    #[arg(long = "candidates", value_name = "FILE")]
    pub candidates: PathBuf,

    /// JSON file with an array of values to resolve.
    #[arg(long = "terms", value_name = "FILE")]
    pub terms: PathBuf,

    /// Print the batch result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Exit with status 1 when any value needs manual review.
    #[arg(long = "fail-on-review")]
    pub fail_on_review: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// First string (the free-text value).
    pub left: String,

    /// Second string (the candidate name).
    pub right: String,

    /// Also run the field-aware scorer for this field type.
    #[arg(long = "field", value_enum)]
    pub field: Option<FieldTypeArg>,
}

#[derive(Parser)]
pub struct AliasesArgs {
    /// Only list this field type's table.
    #[arg(long = "field", value_enum)]
    pub field: Option<FieldTypeArg>,
}

/// CLI field type choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FieldTypeArg {
    Provinces,
    Cities,
    Subjects,
    Banks,
    Categories,
}

impl From<FieldTypeArg> for FieldType {
    fn from(arg: FieldTypeArg) -> Self {
        match arg {
            FieldTypeArg::Provinces => FieldType::Provinces,
            FieldTypeArg::Cities => FieldType::Cities,
            FieldTypeArg::Subjects => FieldType::Subjects,
            FieldTypeArg::Banks => FieldType::Banks,
            FieldTypeArg::Categories => FieldType::Categories,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
