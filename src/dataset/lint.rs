//! Strict shape checks over raw dataset JSON.
//!
//! The loader accepts anything object-shaped and defaults the rest; lint
//! reports every place where that defaulting kicks in.

use crate::types::model::json_kind;
use crate::types::report::Finding;
use crate::types::scoring::MAX_SUBFEATURE_SCORE;
use serde_json::{Map, Value};

pub fn lint_value(value: &Value) -> Vec<Finding> {
    let Some(models) = value.as_object() else {
        return vec![Finding::blocking(
            "dataset.not_object",
            "Dataset is not an object",
            format!(
                "Top-level value must map model names to details, found {}.",
                json_kind(value)
            ),
            None,
        )];
    };

    let mut findings = Vec::new();
    if models.is_empty() {
        findings.push(Finding::warning(
            "dataset.empty",
            "Dataset has no models",
            "Every ranking over this dataset will be empty.",
            None,
        ));
    }

    for (model_name, model) in models {
        match model.as_object() {
            Some(categories) => lint_model(model_name, categories, &mut findings),
            None => findings.push(Finding::blocking(
                "model.not_object",
                "Model is not an object",
                format!("Model must map category names to categories, found {}.", json_kind(model)),
                Some(model_name.clone()),
            )),
        }
    }
    findings
}

fn lint_model(model_name: &str, categories: &Map<String, Value>, findings: &mut Vec<Finding>) {
    for (category_name, category) in categories {
        let location = format!("{model_name}/{category_name}");
        let Some(fields) = category.as_object() else {
            findings.push(Finding::blocking(
                "category.not_object",
                "Category is not an object",
                format!(
                    "Category must hold weight and subfeatures, found {}.",
                    json_kind(category)
                ),
                Some(location),
            ));
            continue;
        };

        match fields.get("weight") {
            None | Some(Value::Null) => findings.push(Finding::warning(
                "category.missing_weight",
                "Category weight missing",
                "Weight defaults to 0, so the category does not count toward the overall score.",
                Some(location.clone()),
            )),
            Some(Value::Number(number)) if number.as_f64().is_some_and(|weight| weight < 0.0) => {
                findings.push(Finding::blocking(
                    "category.negative_weight",
                    "Category weight is negative",
                    format!("Weight {number} is read as 0."),
                    Some(location.clone()),
                ));
            }
            Some(Value::Number(_)) => {}
            Some(other) => findings.push(Finding::blocking(
                "category.invalid_weight",
                "Category weight is not a number",
                format!("Weight must be a number, found {}; it is read as 0.", json_kind(other)),
                Some(location.clone()),
            )),
        }

        match fields.get("subfeatures") {
            Some(Value::Object(subfeatures)) if subfeatures.is_empty() => {
                findings.push(Finding::warning(
                    "category.empty_subfeatures",
                    "Category has no subfeatures",
                    "The category averages 0 and is left out of the overall score.",
                    Some(location),
                ))
            }
            Some(Value::Object(subfeatures)) => lint_subfeatures(&location, subfeatures, findings),
            _ => findings.push(Finding::blocking(
                "category.missing_subfeatures",
                "Category subfeatures missing",
                "Category must contain a `subfeatures` object; it is read as empty.",
                Some(location),
            )),
        }
    }
}

fn lint_subfeatures(location: &str, subfeatures: &Map<String, Value>, findings: &mut Vec<Finding>) {
    for (subfeature_name, subfeature) in subfeatures {
        let location = format!("{location}/{subfeature_name}");
        let (score, note) = match subfeature {
            Value::Number(_) => (Some(subfeature), None),
            Value::Object(fields) => (fields.get("score"), fields.get("note")),
            other => {
                findings.push(Finding::blocking(
                    "subfeature.not_object",
                    "Subfeature has an unexpected shape",
                    format!(
                        "Subfeature must be a number or {{score, note}}, found {}.",
                        json_kind(other)
                    ),
                    Some(location),
                ));
                continue;
            }
        };

        match score {
            None => findings.push(Finding::blocking(
                "subfeature.missing_score",
                "Subfeature score missing",
                "Score defaults to 0.",
                Some(location.clone()),
            )),
            Some(Value::Number(number)) => {
                let in_range = number
                    .as_f64()
                    .is_some_and(|score| (0.0..=MAX_SUBFEATURE_SCORE).contains(&score));
                if !in_range {
                    findings.push(Finding::warning(
                        "subfeature.score_out_of_range",
                        "Subfeature score outside [0, 2]",
                        format!("Score {number} is outside the conventional domain."),
                        Some(location.clone()),
                    ));
                }
            }
            Some(other) => findings.push(Finding::blocking(
                "subfeature.non_numeric_score",
                "Subfeature score is not a number",
                format!("Score must be a number, found {}; it is read as 0.", json_kind(other)),
                Some(location.clone()),
            )),
        }

        if let Some(note) = note {
            if !matches!(note, Value::String(_) | Value::Null) {
                findings.push(Finding::warning(
                    "subfeature.invalid_note",
                    "Subfeature note is not text",
                    format!("Note must be a string, found {}; it is dropped.", json_kind(note)),
                    Some(location),
                ));
            }
        }
    }
}
