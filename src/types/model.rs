//! Dataset, model, category and subfeature definitions.
//!
//! Decoding is lenient below the top level: malformed or missing fields are
//! kept as `None` and read through accessors with a fixed default, so every
//! syntactically valid JSON object decodes into a usable [`Dataset`].

use crate::error::{AbusError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Category name to the set of subfeature names seen under it.
pub type Schema = BTreeMap<String, BTreeSet<String>>;

/// An individually scored trait. Scores are in [0, 2] by convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Subfeature {
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl Subfeature {
    pub fn new(score: f64) -> Self {
        Self {
            score: Some(score),
            note: None,
        }
    }

    /// A subfeature with no score recorded.
    pub fn unscored() -> Self {
        Self::default()
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Score used by every computation. Absent, null and non-numeric scores read as 0.
    pub fn score(&self) -> f64 {
        self.score.filter(|score| score.is_finite()).unwrap_or(0.0)
    }

    /// Free-text note, display only. Defaults to "".
    pub fn note(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }

    pub fn has_score(&self) -> bool {
        self.score.is_some()
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(number) => Self {
                score: number.as_f64(),
                note: None,
            },
            Value::Object(fields) => Self {
                score: fields.get("score").and_then(Value::as_f64),
                note: fields
                    .get("note")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            _ => Self::default(),
        }
    }
}

/// A weighted grouping of subfeatures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    subfeatures: BTreeMap<String, Subfeature>,
}

impl Category {
    pub fn new(weight: f64) -> Self {
        Self {
            weight: Some(weight),
            subfeatures: BTreeMap::new(),
        }
    }

    pub fn with_subfeature(mut self, name: impl Into<String>, subfeature: Subfeature) -> Self {
        self.subfeatures.insert(name.into(), subfeature);
        self
    }

    /// Importance weight. Absent, null, non-numeric, negative and non-finite
    /// weights read as 0; a weight is never negated.
    pub fn weight(&self) -> f64 {
        self.weight
            .filter(|weight| weight.is_finite() && *weight > 0.0)
            .unwrap_or(0.0)
    }

    pub fn subfeatures(&self) -> &BTreeMap<String, Subfeature> {
        &self.subfeatures
    }

    pub fn subfeature(&self, name: &str) -> Option<&Subfeature> {
        self.subfeatures.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.subfeatures.is_empty()
    }

    fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        let subfeatures = fields
            .get("subfeatures")
            .and_then(Value::as_object)
            .map(|subs| {
                subs.iter()
                    .map(|(name, raw)| (name.clone(), Subfeature::from_value(raw)))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            weight: fields.get("weight").and_then(Value::as_f64),
            subfeatures,
        }
    }
}

/// A named scoring subject: category name to category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Model {
    categories: BTreeMap<String, Category>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, name: impl Into<String>, category: Category) -> Self {
        self.categories.insert(name.into(), category);
        self
    }

    pub fn categories(&self) -> &BTreeMap<String, Category> {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn subfeature(&self, category: &str, subfeature: &str) -> Option<&Subfeature> {
        self.category(category)
            .and_then(|found| found.subfeature(subfeature))
    }

    /// Score at `category.subfeature`; 0 when any part of the path is missing.
    pub fn subfeature_score(&self, category: &str, subfeature: &str) -> f64 {
        self.subfeature(category, subfeature)
            .map(Subfeature::score)
            .unwrap_or(0.0)
    }

    /// Note at `category.subfeature`; "" when any part of the path is missing.
    pub fn subfeature_note(&self, category: &str, subfeature: &str) -> &str {
        self.subfeature(category, subfeature)
            .map(Subfeature::note)
            .unwrap_or("")
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Subfeature names under `category`; empty when the category is missing.
    pub fn subfeature_names(&self, category: &str) -> Vec<&str> {
        self.category(category)
            .map(|found| found.subfeatures.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Decodes a model, falling back to an empty model for non-object values.
    pub fn from_value(value: &Value) -> Self {
        let categories = value
            .as_object()
            .map(|fields| {
                fields
                    .iter()
                    .map(|(name, raw)| (name.clone(), Category::from_value(raw)))
                    .collect()
            })
            .unwrap_or_default();
        Self { categories }
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Model name to model. Treated as read-only by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    models: BTreeMap<String, Model>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, name: impl Into<String>, model: Model) -> Self {
        self.models.insert(name.into(), model);
        self
    }

    /// Replaces the entry for `name` wholesale and returns the previous model.
    pub fn upsert(&mut self, name: impl Into<String>, model: Model) -> Option<Model> {
        self.models.insert(name.into(), model)
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Model)> {
        self.models
            .iter()
            .map(|(name, model)| (name.as_str(), model))
    }

    /// Model names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Union of category and subfeature names across every model.
    pub fn schema(&self) -> Schema {
        let mut schema = Schema::new();
        for model in self.models.values() {
            for (category_name, category) in model.categories() {
                schema
                    .entry(category_name.clone())
                    .or_default()
                    .extend(category.subfeatures().keys().cloned());
            }
        }
        schema
    }

    /// Decodes a dataset. Only a non-object top level is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        let fields = value.as_object().ok_or_else(|| {
            AbusError::DatasetParse(format!(
                "dataset must be an object mapping model name to details, found {}",
                json_kind(value)
            ))
        })?;
        Ok(fields
            .iter()
            .map(|(name, raw)| (name.clone(), Model::from_value(raw)))
            .collect())
    }
}

impl FromIterator<(String, Model)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, Model)>>(iter: I) -> Self {
        Self {
            models: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
