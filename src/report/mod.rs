pub mod json;
pub mod md;
pub mod sarif;

use crate::error::AbusError;
use crate::types::model::{Model, Schema};
use crate::types::report::{Finding, RankingReport};
use crate::types::scoring::ModelScore;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Formats available for lint findings.
#[derive(Debug, Clone, Copy)]
pub enum FindingsFormat {
    Json,
    Md,
    Sarif,
}

pub fn render_ranking(report: &RankingReport, format: OutputFormat) -> Result<String, AbusError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(AbusError::Json),
        OutputFormat::Md => Ok(md::ranking_markdown(report)),
    }
}

pub fn render_model(name: &str, model: &Model, format: OutputFormat) -> Result<String, AbusError> {
    match format {
        OutputFormat::Json => json::to_json(model).map_err(AbusError::Json),
        OutputFormat::Md => Ok(md::model_markdown(name, model)),
    }
}

pub fn render_score(score: &ModelScore, format: OutputFormat) -> Result<String, AbusError> {
    match format {
        OutputFormat::Json => json::to_json(score).map_err(AbusError::Json),
        OutputFormat::Md => Ok(md::score_markdown(score)),
    }
}

pub fn render_schema(schema: &Schema, format: OutputFormat) -> Result<String, AbusError> {
    match format {
        OutputFormat::Json => json::to_json(schema).map_err(AbusError::Json),
        OutputFormat::Md => Ok(md::schema_markdown(schema)),
    }
}

pub fn render_findings(findings: &[Finding], format: FindingsFormat) -> Result<String, AbusError> {
    match format {
        FindingsFormat::Json => json::to_json(findings).map_err(AbusError::Json),
        FindingsFormat::Md => Ok(md::findings_markdown(findings)),
        FindingsFormat::Sarif => sarif::to_sarif(findings).map_err(AbusError::Json),
    }
}
