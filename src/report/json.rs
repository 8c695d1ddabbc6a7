use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::{DatasetInfo, RankingReport};
    use crate::types::scoring::RankedResult;
    use std::collections::BTreeMap;

    #[test]
    fn json_ranking_contains_overall_score() {
        let report = RankingReport {
            generated_at: "2026-01-01T00:00:00+00:00".to_string(),
            dataset: DatasetInfo {
                source: "model_scores.json".to_string(),
                digest: "abc".to_string(),
                loaded_at: "2026-01-01T00:00:00+00:00".to_string(),
                model_count: 1,
            },
            constraints: vec!["usability >= 1".to_string()],
            limit: Some(12),
            results: vec![RankedResult {
                name: "MULAN".to_string(),
                overall_score: 80.0,
                category_averages: BTreeMap::from([("usability".to_string(), 1.6)]),
            }],
        };

        let rendered = to_json(&report).expect("json should serialize");
        assert!(rendered.contains("\"overall_score\": 80.0"));
        assert!(rendered.contains("\"usability >= 1\""));
        assert!(rendered.contains("\"limit\": 12"));
    }
}
