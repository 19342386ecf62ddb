use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MarkscanError {
    #[error("failed to load document from {path}: {reason}")]
    DocumentLoad { path: PathBuf, reason: String },

    #[error("unsupported document shape: {0}. The top-level JSON value must be an object")]
    DocumentShape(String),

    #[error("failed to load extraction rules from {path}: {reason}")]
    RulesLoad { path: PathBuf, reason: String },

    #[error("invalid extraction rules: {0}")]
    RulesInvalid(String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
