pub mod discover;
pub mod lint;
pub mod upsert;

use crate::error::{AbusError, Result};
use crate::types::config::AbusConfig;
use crate::types::model::Dataset;
use crate::types::report::DatasetInfo;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A loaded dataset together with where and when it was read.
///
/// The handle is what callers keep between requests; the engine only ever
/// borrows `dataset`.
#[derive(Debug, Clone)]
pub struct DatasetHandle {
    pub source: PathBuf,
    pub digest: String,
    pub loaded_at: DateTime<Utc>,
    pub dataset: Dataset,
}

impl DatasetHandle {
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            source: self.source.display().to_string(),
            digest: self.digest.clone(),
            loaded_at: self.loaded_at.to_rfc3339(),
            model_count: self.dataset.len(),
        }
    }

    /// True when `other` was read from identical bytes.
    pub fn is_same_content(&self, other: &DatasetHandle) -> bool {
        self.digest == other.digest
    }
}

/// Reads and decodes a dataset file. A missing file or malformed JSON is an
/// error, never an empty dataset.
pub fn load(path: &Path) -> Result<DatasetHandle> {
    let (bytes, value) = read_raw(path)?;
    let dataset = Dataset::from_value(&value).map_err(|e| match e {
        AbusError::DatasetParse(detail) => {
            AbusError::DatasetParse(format!("{}: {}", path.display(), detail))
        }
        other => other,
    })?;
    let handle = DatasetHandle {
        source: path.to_path_buf(),
        digest: sha256_hex(&bytes),
        loaded_at: Utc::now(),
        dataset,
    };
    info!(
        source = %path.display(),
        models = handle.dataset.len(),
        "loaded dataset"
    );
    Ok(handle)
}

/// Reads a dataset file as untyped JSON, for checks that need the raw shape.
pub fn load_value(path: &Path) -> Result<Value> {
    read_raw(path).map(|(_, value)| value)
}

pub fn parse_str(content: &str) -> Result<Dataset> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| AbusError::DatasetParse(e.to_string()))?;
    Dataset::from_value(&value)
}

/// Picks the dataset file: an explicit path wins, then `[dataset].path` from
/// config (relative to `root`), then discovery under `root`.
pub fn resolve_path(
    root: &Path,
    explicit: Option<&Path>,
    config: Option<&AbusConfig>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "using dataset from command line");
        return Ok(path.to_path_buf());
    }
    if let Some(path) = config.and_then(AbusConfig::dataset_path) {
        let path = root.join(path);
        debug!(path = %path.display(), "using dataset from config");
        return Ok(path);
    }
    discover::find_dataset(root).ok_or_else(|| {
        AbusError::DatasetNotFound(format!(
            "no {} under {}; pass --dataset or set [dataset].path",
            discover::DATASET_FILE_NAME,
            root.display()
        ))
    })
}

fn read_raw(path: &Path) -> Result<(Vec<u8>, Value)> {
    if !path.exists() {
        return Err(AbusError::DatasetNotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    let value = serde_json::from_slice(&bytes)
        .map_err(|e| AbusError::DatasetParse(format!("{}: {}", path.display(), e)))?;
    Ok((bytes, value))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
