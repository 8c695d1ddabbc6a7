use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

pub const DATASET_FILE_NAME: &str = "model_scores.json";

const CANDIDATES: [&str; 2] = ["abus/data/model_scores.json", "data/model_scores.json"];

/// Finds a dataset under `root`: the conventional locations first, then the
/// first `model_scores.json` in a name-sorted walk.
pub fn find_dataset(root: &Path) -> Option<PathBuf> {
    if let Some(found) = CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
    {
        return Some(found);
    }

    let found = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| entry.file_name() == DATASET_FILE_NAME)
        .map(|entry| entry.path().to_path_buf());

    if let Some(path) = &found {
        warn!(path = %path.display(), "dataset found outside the conventional locations");
    }
    found
}
