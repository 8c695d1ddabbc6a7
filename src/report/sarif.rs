use crate::types::report::Finding;
use serde_json::json;

pub fn to_sarif(findings: &[Finding]) -> Result<String, serde_json::Error> {
    let results: Vec<_> = findings
        .iter()
        .map(|finding| {
            let mut result = json!({
                "ruleId": finding.id,
                "level": if finding.blocking { "error" } else { "warning" },
                "message": { "text": finding.body },
            });
            if let Some(location) = &finding.location {
                result["locations"] = json!([{
                    "logicalLocations": [{ "fullyQualifiedName": location }]
                }]);
            }
            result
        })
        .collect();

    let sarif = json!({
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "abus"
                }
            },
            "results": results
        }]
    });

    serde_json::to_string_pretty(&sarif)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sarif_maps_severity_and_location() {
        let rendered = to_sarif(&[
            Finding::blocking("model.not_object", "Model is not an object", "bad", Some("M2".to_string())),
            Finding::warning("dataset.empty", "Dataset has no models", "empty", None),
        ])
        .expect("sarif should serialize");

        assert!(rendered.contains("\"version\": \"2.1.0\""));
        assert!(rendered.contains("\"level\": \"error\""));
        assert!(rendered.contains("\"level\": \"warning\""));
        assert!(rendered.contains("\"fullyQualifiedName\": \"M2\""));
    }
}
