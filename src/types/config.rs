use crate::engine::constraints::{ConstraintKey, ConstraintSet};
use crate::error::AbusError;
use crate::types::scoring::MAX_SUBFEATURE_SCORE;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Display limit used when neither the command line nor config sets one.
pub const DEFAULT_LIMIT: usize = 12;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbusConfig {
    pub dataset: Option<DatasetConfig>,
    pub ranking: Option<RankingConfig>,
    /// Default minimum thresholds, keyed `category` or `category.subfeature`.
    #[serde(default)]
    pub constraints: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    pub limit: Option<usize>,
}

impl AbusConfig {
    pub fn dataset_path(&self) -> Option<&str> {
        self.dataset
            .as_ref()
            .and_then(|dataset| dataset.path.as_deref())
    }

    pub fn limit(&self) -> usize {
        self.ranking
            .as_ref()
            .and_then(|ranking| ranking.limit)
            .unwrap_or(DEFAULT_LIMIT)
    }

    /// Config thresholds as inclusive minimums.
    pub fn constraints(&self) -> Result<ConstraintSet, AbusError> {
        let mut constraints = ConstraintSet::new();
        for (key, threshold) in &self.constraints {
            let parsed = key
                .parse::<ConstraintKey>()
                .map_err(|e| AbusError::ConfigParse(format!("constraints: {e}")))?;
            constraints.insert_min(parsed, *threshold);
        }
        Ok(constraints)
    }

    pub fn validate(&self) -> Result<(), AbusError> {
        if let Some(path) = self.dataset_path() {
            if path.trim().is_empty() {
                return Err(AbusError::ConfigParse(
                    "dataset.path must not be empty".to_string(),
                ));
            }
        }

        if let Some(limit) = self.ranking.as_ref().and_then(|ranking| ranking.limit) {
            if limit == 0 {
                return Err(AbusError::ConfigParse(
                    "ranking.limit must be greater than 0".to_string(),
                ));
            }
        }

        for (key, threshold) in &self.constraints {
            if !threshold.is_finite() || !(0.0..=MAX_SUBFEATURE_SCORE).contains(threshold) {
                return Err(AbusError::ConfigParse(format!(
                    "constraints.{key} must be between 0.0 and 2.0 (found {threshold})"
                )));
            }
        }
        self.constraints()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_sections_missing() {
        let cfg: AbusConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.limit(), DEFAULT_LIMIT);
        assert_eq!(cfg.dataset_path(), None);
        assert!(cfg.constraints().expect("constraints should build").is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parses_full_config() {
        let cfg: AbusConfig = toml::from_str(
            r#"
[dataset]
path = "abus/data/model_scores.json"

[ranking]
limit = 8

[constraints]
"usability.code_availability" = 1.0
adaptability = 1.5
"#,
        )
        .expect("config should parse");

        assert_eq!(cfg.dataset_path(), Some("abus/data/model_scores.json"));
        assert_eq!(cfg.limit(), 8);
        let constraints = cfg.constraints().expect("constraints should build");
        assert_eq!(
            constraints.describe(),
            vec![
                "adaptability >= 1.5".to_string(),
                "usability.code_availability >= 1".to_string()
            ]
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_limit() {
        let cfg: AbusConfig = toml::from_str(
            r#"
[ranking]
limit = 0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("ranking.limit must be greater than 0"));
    }

    #[test]
    fn validate_rejects_threshold_outside_score_domain() {
        let cfg: AbusConfig = toml::from_str(
            r#"
[constraints]
usability = 2.5
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("constraints.usability"));
    }

    #[test]
    fn validate_rejects_malformed_constraint_key() {
        let cfg: AbusConfig = toml::from_str(
            r#"
[constraints]
"usability." = 1.0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("constraints:"));
    }

    #[test]
    fn validate_rejects_empty_dataset_path() {
        let cfg: AbusConfig = toml::from_str(
            r#"
[dataset]
path = " "
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }
}
