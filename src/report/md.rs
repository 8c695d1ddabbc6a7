use crate::types::model::{Model, Schema};
use crate::types::report::{Finding, RankingReport};
use crate::types::scoring::ModelScore;

pub fn ranking_markdown(report: &RankingReport) -> String {
    let mut output = String::new();
    output.push_str("# Model Ranking\n\n");
    output.push_str(&format!(
        "Dataset: {} ({} models, sha256 {})\n",
        report.dataset.source,
        report.dataset.model_count,
        short_digest(&report.dataset.digest)
    ));
    output.push_str(&format!("Loaded: {}\n", report.dataset.loaded_at));
    output.push_str(&format!("Generated: {}\n", report.generated_at));
    match report.limit {
        Some(limit) => output.push_str(&format!("Limit: {limit}\n\n")),
        None => output.push_str("Limit: none\n\n"),
    }

    output.push_str("## Constraints\n\n");
    if report.constraints.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for constraint in &report.constraints {
            output.push_str(&format!("- {constraint}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Results\n\n");
    if report.results.is_empty() {
        output.push_str("No models match these constraints.\n");
        return output;
    }

    for (position, result) in report.results.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} (ABUS {:.1})\n",
            position + 1,
            result.name,
            result.overall_score
        ));
        let averages = result
            .category_averages
            .iter()
            .map(|(category, average)| format!("{category}={average:.2}"))
            .collect::<Vec<_>>();
        if !averages.is_empty() {
            output.push_str(&format!("   - category averages: {}\n", averages.join(", ")));
        }
    }

    output
}

pub fn model_markdown(name: &str, model: &Model) -> String {
    let mut output = format!("# {name}\n\n");
    if model.is_empty() {
        output.push_str("No categories recorded.\n");
        return output;
    }

    for (category_name, category) in model.categories() {
        output.push_str(&format!(
            "## {} (weight: {})\n\n",
            category_name,
            category.weight()
        ));
        if category.is_empty() {
            output.push_str("- no subfeatures\n\n");
            continue;
        }
        for (subfeature_name, subfeature) in category.subfeatures() {
            let score = if subfeature.has_score() {
                subfeature.score().to_string()
            } else {
                "?".to_string()
            };
            output.push_str(&format!("- **{subfeature_name}** score: {score}\n"));
            if !subfeature.note().is_empty() {
                output.push_str(&format!("  {}\n", subfeature.note()));
            }
        }
        output.push('\n');
    }

    output
}

pub fn score_markdown(score: &ModelScore) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", score.model));
    output.push_str(&format!("Overall score: {:.1}\n\n", score.overall));
    output.push_str("## Category Scores\n\n");
    if score.categories.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    for (category, summary) in &score.categories {
        output.push_str(&format!(
            "- {}: average {:.2} over {} subfeature(s), weight {}\n",
            category, summary.average, summary.count, summary.weight
        ));
    }
    output
}

pub fn schema_markdown(schema: &Schema) -> String {
    let mut output = String::from("# Schema\n\n");
    if schema.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    for (category, subfeatures) in schema {
        output.push_str(&format!("## {category}\n\n"));
        if subfeatures.is_empty() {
            output.push_str("- no subfeatures\n");
        }
        for subfeature in subfeatures {
            output.push_str(&format!("- {subfeature}\n"));
        }
        output.push('\n');
    }
    output
}

pub fn findings_markdown(findings: &[Finding]) -> String {
    let mut output = String::from("# Dataset Lint\n\n");
    if findings.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    for finding in findings {
        output.push_str(&format!(
            "- [{}] {}{}: {}\n",
            if finding.blocking {
                "blocking"
            } else {
                "warning"
            },
            finding.title,
            finding
                .location
                .as_deref()
                .map(|location| format!(" ({location})"))
                .unwrap_or_default(),
            finding.body
        ));
    }
    output
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::score_model;
    use crate::types::model::{Category, Subfeature};
    use crate::types::report::DatasetInfo;
    use crate::types::scoring::RankedResult;
    use std::collections::BTreeMap;

    fn report(results: Vec<RankedResult>) -> RankingReport {
        RankingReport {
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
            dataset: DatasetInfo {
                source: "model_scores.json".to_string(),
                digest: "0123456789abcdef".to_string(),
                loaded_at: "2026-01-01T00:00:00+00:00".to_string(),
                model_count: 2,
            },
            constraints: Vec::new(),
            limit: None,
            results,
        }
    }

    #[test]
    fn ranking_markdown_lists_results_in_order() {
        let rendered = ranking_markdown(&report(vec![
            RankedResult {
                name: "M1".to_string(),
                overall_score: 80.0,
                category_averages: BTreeMap::from([("usability".to_string(), 1.6)]),
            },
            RankedResult {
                name: "M2".to_string(),
                overall_score: 40.0,
                category_averages: BTreeMap::new(),
            },
        ]));
        assert!(rendered.contains("# Model Ranking"));
        assert!(rendered.contains("sha256 0123456789ab)"));
        assert!(rendered.contains("1. M1 (ABUS 80.0)"));
        assert!(rendered.contains("usability=1.60"));
        assert!(rendered.contains("2. M2 (ABUS 40.0)"));
    }

    #[test]
    fn ranking_markdown_explains_empty_result() {
        let rendered = ranking_markdown(&report(Vec::new()));
        assert!(rendered.contains("No models match these constraints."));
    }

    #[test]
    fn model_markdown_shows_weights_scores_and_notes() {
        let model = Model::new().with_category(
            "usability",
            Category::new(10.0)
                .with_subfeature("code_availability", Subfeature::new(2.0).with_note("on GitHub"))
                .with_subfeature("docs", Subfeature::unscored()),
        );
        let rendered = model_markdown("MULAN", &model);
        assert!(rendered.contains("## usability (weight: 10)"));
        assert!(rendered.contains("**code_availability** score: 2"));
        assert!(rendered.contains("on GitHub"));
        assert!(rendered.contains("**docs** score: ?"));
    }

    #[test]
    fn score_markdown_contains_sections() {
        let model = Model::new().with_category(
            "usability",
            Category::new(1.0).with_subfeature("docs", Subfeature::new(1.0)),
        );
        let rendered = score_markdown(&score_model("MULAN", &model));
        assert!(rendered.contains("Overall score: 50.0"));
        assert!(rendered.contains("## Category Scores"));
        assert!(rendered.contains("usability: average 1.00 over 1 subfeature(s)"));
    }

    #[test]
    fn findings_markdown_marks_severity() {
        let rendered = findings_markdown(&[Finding::blocking(
            "subfeature.missing_score",
            "Subfeature score missing",
            "Score defaults to 0.",
            Some("M1/A/s1".to_string()),
        )]);
        assert!(rendered.contains("[blocking] Subfeature score missing (M1/A/s1)"));
    }
}
