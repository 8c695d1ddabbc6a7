use crate::error::{AbusError, Result};
use crate::types::model::{Dataset, Model};
use serde_json::Value;
use tracing::info;

/// Splits an ingest payload `{"name": ..., "categories": {...}}` into the
/// model name and its decoded model.
pub fn parse_payload(payload: &Value) -> Result<(String, Model)> {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AbusError::InvalidPayload("payload.name is required".to_string()))?;

    let categories = match payload.get("categories") {
        None => Value::Object(Default::default()),
        Some(categories @ Value::Object(_)) => categories.clone(),
        Some(_) => {
            return Err(AbusError::InvalidPayload(
                "payload.categories must be an object".to_string(),
            ))
        }
    };

    Ok((name.to_string(), Model::from_value(&categories)))
}

/// Replaces the payload's model in `dataset`. Returns the model name and
/// whether an existing entry was replaced.
pub fn apply_payload(dataset: &mut Dataset, payload: &Value) -> Result<(String, bool)> {
    let (name, model) = parse_payload(payload)?;
    let replaced = dataset.upsert(name.clone(), model).is_some();
    info!(model = %name, replaced, "upserted model");
    Ok((name, replaced))
}
