use serde::Serialize;
use std::collections::BTreeMap;

pub type Score = f64;

/// Upper bound of the subfeature score domain.
pub const MAX_SUBFEATURE_SCORE: Score = 2.0;

/// One entry of a ranking, computed fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub name: String,
    pub overall_score: Score,
    pub category_averages: BTreeMap<String, Score>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub weight: Score,
    pub average: Score,
    pub count: usize,
}

/// Per-category breakdown plus the overall score of a single model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelScore {
    pub model: String,
    pub categories: BTreeMap<String, CategorySummary>,
    pub overall: Score,
}
