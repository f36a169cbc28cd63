use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AgroError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("crop '{crop}' not found in dataset. Available: {}", format_available(.available))]
    CropNotFound { crop: String, available: Vec<String> },

    #[error("failed to fetch reference dataset: {0}")]
    DatasetFetch(String),

    #[error("failed to parse reference dataset: {0}")]
    DatasetParse(String),

    #[error("failed to load crop profiles from {path}: {reason}")]
    ProfilesLoad { path: PathBuf, reason: String },

    #[error("invalid crop profiles: {0}")]
    ProfilesInvalid(String),

    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "none (dataset is empty or could not be loaded)".to_string()
    } else {
        available.join(", ")
    }
}
