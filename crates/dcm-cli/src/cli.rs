//! CLI argument definitions for the field mapper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dcm-map",
    version,
    about = "Recommend data-dictionary mappings for ingested inventory columns",
    long_about = "Recommend which data-dictionary entity and field each ingested column maps to.\n\n\
                  Reads the data dictionary, optional schema entities and source columns as JSON\n\
                  exports, and reports one recommendation per column for human confirmation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow sampled column values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Recommend a mapping for every column in a columns export.
    Recommend(RecommendArgs),

    /// Show the ranked candidates and score breakdown for one column.
    Explain(ExplainArgs),

    /// List the match targets built from the dictionary and entities.
    Catalog(CatalogArgs),
}

/// Inputs shared by every command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Data dictionary export: `[{id, name, entity, standard_values: [{value}]}]`.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: PathBuf,

    /// Schema entities export: `[{name, fields: [{name}]}]`.
    #[arg(long = "entities", value_name = "PATH")]
    pub entities: Option<PathBuf>,
}

/// Ranker tuning shared by the ranking commands.
#[derive(Args)]
pub struct TuningArgs {
    /// JSON file overriding ranker constants (any subset of fields).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum combined score for a recommendation (default: 40).
    #[arg(long = "min-score", value_name = "SCORE")]
    pub min_score: Option<f64>,
}

#[derive(Args)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Source columns export: `[{column_name, sample_values: [...]}]`.
    #[arg(long = "columns", value_name = "PATH")]
    pub columns: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Source column name to explain.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Sampled value from the column (repeatable).
    #[arg(long = "sample", value_name = "VALUE")]
    pub samples: Vec<String>,

    /// Number of candidates to show.
    #[arg(long = "top", default_value_t = 5)]
    pub top: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
