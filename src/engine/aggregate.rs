use crate::types::model::{Category, Model};
use crate::types::scoring::{CategorySummary, ModelScore, Score, MAX_SUBFEATURE_SCORE};
use std::collections::BTreeMap;

/// Arithmetic mean of the category's subfeature scores, 0 when it has none.
pub fn category_average(category: &Category) -> Score {
    let subfeatures = category.subfeatures();
    if subfeatures.is_empty() {
        return 0.0;
    }
    let total: Score = subfeatures.values().map(|subfeature| subfeature.score()).sum();
    total / subfeatures.len() as Score
}

/// Like [`category_average`], but a missing category averages 0.
pub fn category_average_or_zero(category: Option<&Category>) -> Score {
    category.map(category_average).unwrap_or(0.0)
}

/// Weighted average of normalized category averages, on a 0-100 scale.
///
/// Each non-empty category contributes `weight * average / 2`; empty
/// categories are left out of both the numerator and the denominator so they
/// cannot pass for a perfect or a zero score. When no weighted, non-empty
/// category exists the result is 0.
///
/// Weights are divided by the largest one before summing so huge but finite
/// weights cannot overflow the totals.
pub fn overall_score(model: &Model) -> Score {
    let scored = model
        .categories()
        .values()
        .filter(|category| !category.is_empty())
        .map(|category| {
            (
                category.weight(),
                category_average(category) / MAX_SUBFEATURE_SCORE,
            )
        })
        .collect::<Vec<_>>();

    let max_weight = scored.iter().map(|(weight, _)| *weight).fold(0.0, Score::max);
    if max_weight == 0.0 {
        return 0.0;
    }

    let mut weighted_sum: Score = 0.0;
    let mut weight_total: Score = 0.0;
    for (weight, normalized) in scored {
        let relative = weight / max_weight;
        weighted_sum += relative * normalized;
        weight_total += relative;
    }

    let score = 100.0 * weighted_sum / weight_total;
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Average for every category present in the model. Absent categories are
/// absent from the result.
pub fn category_averages(model: &Model) -> BTreeMap<String, Score> {
    model
        .categories()
        .iter()
        .map(|(name, category)| (name.clone(), category_average(category)))
        .collect()
}

pub fn score_model(name: &str, model: &Model) -> ModelScore {
    let categories = model
        .categories()
        .iter()
        .map(|(category_name, category)| {
            (
                category_name.clone(),
                CategorySummary {
                    weight: category.weight(),
                    average: category_average(category),
                    count: category.subfeatures().len(),
                },
            )
        })
        .collect();

    ModelScore {
        model: name.to_string(),
        categories,
        overall: overall_score(model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::model::Subfeature;

    fn scored(weight: f64, scores: &[f64]) -> Category {
        scores
            .iter()
            .enumerate()
            .fold(Category::new(weight), |category, (index, score)| {
                category.with_subfeature(format!("s{index}"), Subfeature::new(*score))
            })
    }

    #[test]
    fn empty_category_averages_zero() {
        assert_eq!(category_average(&Category::new(5.0)), 0.0);
        assert_eq!(category_average_or_zero(None), 0.0);
    }

    #[test]
    fn category_average_treats_unscored_as_zero() {
        let category = Category::new(1.0)
            .with_subfeature("a", Subfeature::new(2.0))
            .with_subfeature("b", Subfeature::unscored());
        assert_eq!(category_average(&category), 1.0);
    }

    #[test]
    fn overall_score_of_two_category_model_is_fifty() {
        let model = Model::new()
            .with_category("A", Category::new(1.0).with_subfeature("s1", Subfeature::new(2.0)))
            .with_category("B", Category::new(1.0).with_subfeature("s2", Subfeature::new(0.0)));

        assert_eq!(model.category("A").map(category_average), Some(2.0));
        assert_eq!(model.category("B").map(category_average), Some(0.0));
        assert_eq!(overall_score(&model), 50.0);
    }

    #[test]
    fn all_zero_weights_yield_zero_not_nan() {
        let model = Model::new()
            .with_category("A", scored(0.0, &[2.0, 2.0]))
            .with_category("B", scored(0.0, &[1.0]));
        let score = overall_score(&model);
        assert_eq!(score, 0.0);
        assert!(!score.is_nan());
    }

    #[test]
    fn empty_categories_are_excluded_from_weight_total() {
        let model = Model::new()
            .with_category("full", scored(1.0, &[2.0]))
            .with_category("empty", Category::new(10.0));
        assert_eq!(overall_score(&model), 100.0);
    }

    #[test]
    fn zero_weight_category_contributes_nothing() {
        let model = Model::new()
            .with_category("A", scored(1.0, &[1.0]))
            .with_category("B", scored(0.0, &[2.0, 2.0]));
        assert_eq!(overall_score(&model), 50.0);
    }

    #[test]
    fn subfeature_count_does_not_bias_category_influence() {
        let model = Model::new()
            .with_category("many", scored(1.0, &[2.0, 2.0, 2.0, 2.0]))
            .with_category("one", scored(1.0, &[0.0]));
        assert_eq!(overall_score(&model), 50.0);
    }

    #[test]
    fn overall_score_stays_within_bounds() {
        let steps = [0.0, 0.5, 1.0, 1.5, 2.0];
        let weights = [0.0, 0.1, 1.0, 20.0, 1000.0];
        for a in steps {
            for b in steps {
                for wa in weights {
                    for wb in weights {
                        let model = Model::new()
                            .with_category("A", scored(wa, &[a, b]))
                            .with_category("B", scored(wb, &[b]));
                        let score = overall_score(&model);
                        assert!((0.0..=100.0).contains(&score), "out of range: {score}");
                    }
                }
            }
        }
    }

    #[test]
    fn extreme_weights_do_not_overflow() {
        let model = Model::new()
            .with_category("A", scored(1e308, &[2.0]))
            .with_category("B", scored(1e308, &[0.0]));
        assert_eq!(overall_score(&model), 50.0);

        let lopsided = Model::new()
            .with_category("A", scored(f64::MAX, &[2.0]))
            .with_category("B", scored(1.0, &[0.0]));
        let score = overall_score(&lopsided);
        assert!((0.0..=100.0).contains(&score), "out of range: {score}");
        assert!(score > 99.0);
    }

    #[test]
    fn category_averages_only_lists_present_categories() {
        let model = Model::new()
            .with_category("A", scored(1.0, &[1.0, 2.0]))
            .with_category("B", Category::new(1.0));
        let averages = category_averages(&model);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages.get("A"), Some(&1.5));
        assert_eq!(averages.get("B"), Some(&0.0));
        assert!(!averages.contains_key("C"));
    }

    #[test]
    fn score_model_reports_counts_and_weights() {
        let model = Model::new()
            .with_category("A", scored(20.0, &[2.0, 1.0]))
            .with_category("B", Category::new(5.0));
        let summary = score_model("MULAN", &model);
        assert_eq!(summary.model, "MULAN");
        assert_eq!(
            summary.categories.get("A"),
            Some(&CategorySummary {
                weight: 20.0,
                average: 1.5,
                count: 2
            })
        );
        assert_eq!(
            summary.categories.get("B"),
            Some(&CategorySummary {
                weight: 5.0,
                average: 0.0,
                count: 0
            })
        );
        assert_eq!(summary.overall, 75.0);
    }
}
