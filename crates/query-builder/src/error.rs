use model::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid backend in configuration: {0}")]
    InvalidBackend(#[from] ModelError),

    #[error("Configured id field must not be empty")]
    EmptyIdField,

    #[error("Failed to parse query configuration: {0}")]
    Json(#[from] serde_json::Error),
}
