use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "abus",
    version,
    about = "Browse, score and rank models in an ABUS scoring dataset"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List model names
    List(ListCommand),
    /// Show one model's weights, scores and notes
    Show(ShowCommand),
    /// Per-category averages and overall score of one model
    Score(ScoreCommand),
    /// Filter models by minimum scores and rank them
    Rank(RankCommand),
    /// Categories and subfeatures seen across the dataset
    Schema(SchemaCommand),
    /// Check the dataset for malformed or missing fields
    Lint(LintCommand),
    /// Replace a model from an ingest payload and print the dataset
    Upsert(UpsertCommand),
}

#[derive(Args)]
pub struct DatasetArgs {
    /// Dataset file; defaults to [dataset].path in abus.toml, then discovery
    #[arg(long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub source: DatasetArgs,
}

#[derive(Args)]
pub struct ShowCommand {
    pub model: String,
    #[command(flatten)]
    pub source: DatasetArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub model: String,
    #[command(flatten)]
    pub source: DatasetArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RankCommand {
    #[command(flatten)]
    pub source: DatasetArgs,

    /// Inclusive minimum, e.g. usability=1 or usability.code_availability=1.5
    #[arg(long = "min", value_name = "KEY=VALUE")]
    pub min: Vec<String>,

    /// Comparison, e.g. "adaptability.transferability>1"
    #[arg(long = "where", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Maximum number of results (default from config, else 12)
    #[arg(long, conflicts_with = "all")]
    pub limit: Option<usize>,

    /// Return every matching model
    #[arg(long)]
    pub all: bool,

    /// Ignore [constraints] from abus.toml
    #[arg(long)]
    pub no_default_constraints: bool,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SchemaCommand {
    #[command(flatten)]
    pub source: DatasetArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct LintCommand {
    #[command(flatten)]
    pub source: DatasetArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: LintFormat,
}

#[derive(Args)]
pub struct UpsertCommand {
    /// JSON payload: {"name": ..., "categories": {...}}
    pub payload: PathBuf,
    #[command(flatten)]
    pub source: DatasetArgs,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, ValueEnum)]
pub enum LintFormat {
    Json,
    Md,
    Sarif,
}
