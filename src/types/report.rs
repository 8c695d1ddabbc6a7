use crate::engine::constraints::ConstraintSet;
use crate::types::scoring::RankedResult;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
    pub location: Option<String>,
}

impl Finding {
    pub fn blocking(
        id: &str,
        title: &str,
        body: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.into(),
            blocking: true,
            location,
        }
    }

    pub fn warning(
        id: &str,
        title: &str,
        body: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.into(),
            blocking: false,
            location,
        }
    }
}

/// Where the ranked data came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub source: String,
    pub digest: String,
    pub loaded_at: String,
    pub model_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub generated_at: String,
    pub dataset: DatasetInfo,
    pub constraints: Vec<String>,
    pub limit: Option<usize>,
    pub results: Vec<RankedResult>,
}

impl RankingReport {
    pub fn new(
        dataset: DatasetInfo,
        constraints: &ConstraintSet,
        limit: Option<usize>,
        results: Vec<RankedResult>,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            dataset,
            constraints: constraints.describe(),
            limit,
            results,
        }
    }
}
