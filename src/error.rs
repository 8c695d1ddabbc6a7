use thiserror::Error;

#[derive(Error, Debug)]
pub enum AbusError {
    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("dataset parse error: {0}")]
    DatasetParse(String),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AbusError>;
