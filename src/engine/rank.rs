use super::aggregate::{category_averages, overall_score};
use super::constraints::{matches, ConstraintSet};
use crate::types::model::Dataset;
use crate::types::scoring::RankedResult;
use std::cmp::Ordering;
use tracing::debug;

/// Filters `dataset` by `constraints`, scores the survivors and sorts them by
/// descending overall score, breaking ties by ascending model name. `limit`
/// truncates the result; `None` keeps every match.
pub fn rank(
    dataset: &Dataset,
    constraints: &ConstraintSet,
    limit: Option<usize>,
) -> Vec<RankedResult> {
    let mut results = dataset
        .iter()
        .filter(|(_, model)| matches(model, constraints))
        .map(|(name, model)| RankedResult {
            name: name.to_string(),
            overall_score: overall_score(model),
            category_averages: category_averages(model),
        })
        .collect::<Vec<_>>();

    let matched = results.len();
    results.sort_by(by_score_then_name);
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    debug!(
        models = dataset.len(),
        constraints = constraints.len(),
        matched,
        returned = results.len(),
        "ranked dataset"
    );
    results
}

fn by_score_then_name(left: &RankedResult, right: &RankedResult) -> Ordering {
    right
        .overall_score
        .total_cmp(&left.overall_score)
        .then_with(|| left.name.cmp(&right.name))
}
