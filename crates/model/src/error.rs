use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown match mode: {0}")]
    UnknownMatchMode(String),
}
