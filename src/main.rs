mod cli;

use abus::config;
use abus::dataset::{self, lint, upsert, DatasetHandle};
use abus::engine::{self, ConstraintSet};
use abus::error::AbusError;
use abus::report::{self, FindingsFormat, OutputFormat};
use abus::types::config::{AbusConfig, DEFAULT_LIMIT};
use abus::types::report::RankingReport;
use clap::Parser;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            _ => EnvFilter::new("debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config from the working directory plus the dataset it points at.
fn open_dataset(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<(Option<AbusConfig>, DatasetHandle), AbusError> {
    let loaded = config::load_config(root)?;
    let path = dataset::resolve_path(root, explicit, loaded.as_ref())?;
    let handle = dataset::load(&path)?;
    Ok((loaded, handle))
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn build_constraints(
    cmd: &cli::RankCommand,
    config: Option<&AbusConfig>,
) -> Result<ConstraintSet, AbusError> {
    let mut constraints = match config {
        Some(cfg) if !cmd.no_default_constraints => cfg.constraints()?,
        _ => ConstraintSet::new(),
    };

    let mut overrides = ConstraintSet::new();
    for raw in &cmd.min {
        overrides.parse_min(raw)?;
    }
    for raw in &cmd.filters {
        overrides.parse_expr(raw)?;
    }
    constraints.extend(overrides);
    Ok(constraints)
}

fn run(cli: cli::Cli) -> Result<i32, AbusError> {
    let root = std::env::current_dir()?;
    match cli.command {
        cli::Commands::List(cmd) => {
            let (_, handle) = open_dataset(&root, cmd.source.dataset.as_deref())?;
            if handle.dataset.is_empty() {
                println!("list: no models");
                return Ok(exit_code::SUCCESS);
            }
            for name in handle.dataset.names() {
                println!("{name}");
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Show(cmd) => {
            let (_, handle) = open_dataset(&root, cmd.source.dataset.as_deref())?;
            let model = handle
                .dataset
                .model(&cmd.model)
                .ok_or_else(|| AbusError::ModelNotFound(cmd.model.clone()))?;
            let rendered = report::render_model(&cmd.model, model, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Score(cmd) => {
            let (_, handle) = open_dataset(&root, cmd.source.dataset.as_deref())?;
            let model = handle
                .dataset
                .model(&cmd.model)
                .ok_or_else(|| AbusError::ModelNotFound(cmd.model.clone()))?;
            let score = engine::score_model(&cmd.model, model);
            let rendered = report::render_score(&score, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Rank(cmd) => {
            let (loaded, handle) = open_dataset(&root, cmd.source.dataset.as_deref())?;
            let constraints = build_constraints(&cmd, loaded.as_ref())?;
            let limit = if cmd.all {
                None
            } else {
                Some(
                    cmd.limit
                        .or_else(|| loaded.as_ref().map(AbusConfig::limit))
                        .unwrap_or(DEFAULT_LIMIT),
                )
            };
            debug!(constraints = ?constraints.describe(), ?limit, "ranking request");

            let results = engine::rank(&handle.dataset, &constraints, limit);
            let ranking = RankingReport::new(handle.info(), &constraints, limit, results);
            let rendered = report::render_ranking(&ranking, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Schema(cmd) => {
            let (_, handle) = open_dataset(&root, cmd.source.dataset.as_deref())?;
            let schema = handle.dataset.schema();
            let rendered = report::render_schema(&schema, output_format(&cmd.format))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Lint(cmd) => {
            let loaded = config::load_config(&root)?;
            let path =
                dataset::resolve_path(&root, cmd.source.dataset.as_deref(), loaded.as_ref())?;
            let value = dataset::load_value(&path)?;
            let findings = lint::lint_value(&value);

            let format = match cmd.format {
                cli::LintFormat::Json => FindingsFormat::Json,
                cli::LintFormat::Md => FindingsFormat::Md,
                cli::LintFormat::Sarif => FindingsFormat::Sarif,
            };
            let rendered = report::render_findings(&findings, format)?;
            println!("{rendered}");

            if findings.iter().any(|finding| finding.blocking) {
                Ok(exit_code::BLOCKING)
            } else if !findings.is_empty() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Upsert(cmd) => {
            if !cmd.payload.exists() {
                return Err(AbusError::PathNotFound(cmd.payload.display().to_string()));
            }
            let raw = std::fs::read_to_string(&cmd.payload)?;
            let payload: serde_json::Value = serde_json::from_str(&raw)?;

            let (_, mut handle) = open_dataset(&root, cmd.source.dataset.as_deref())?;
            let (name, replaced) = upsert::apply_payload(&mut handle.dataset, &payload)?;
            eprintln!(
                "upsert: {} {}",
                if replaced { "replaced" } else { "added" },
                name
            );
            println!("{}", report::json::to_json(&handle.dataset)?);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
