//! Backend selection and id-field configuration.
//!
//! Builders take their backend either from an explicit [`QueryConfig`] or
//! from the process-wide default. The default is meant to be set once while
//! the application starts, before any builder is created; changing it while
//! other threads are building queries makes their backend unpredictable.

use crate::error::ConfigError;
use lazy_static::lazy_static;
use model::filter::Backend;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::info;

pub const BACKEND_ENV: &str = "QUERY_BACKEND";
pub const ID_FIELD_ENV: &str = "QUERY_ID_FIELD";

lazy_static! {
    static ref DEFAULT_BACKEND: RwLock<Backend> = RwLock::new(Backend::default());
}

/// Sets the backend used by [`QueryBuilder::new`](crate::QueryBuilder::new)
/// and the shorthand functions.
pub fn set_default_backend(backend: Backend) {
    let mut guard = DEFAULT_BACKEND
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if *guard != backend {
        info!("Default query backend changed from {} to {}", *guard, backend);
    }
    *guard = backend;
}

pub fn default_backend() -> Backend {
    *DEFAULT_BACKEND
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub backend: Backend,
    /// Overrides the backend's default id field (`id` or `_id`).
    pub id_field: Option<String>,
}

impl QueryConfig {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            id_field: None,
        }
    }

    pub fn with_id_field(mut self, field: &str) -> Self {
        self.id_field = Some(field.to_string());
        self
    }

    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: QueryConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `QUERY_BACKEND` and `QUERY_ID_FIELD`; unset variables keep the
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QueryConfig::default();
        if let Some(backend) = lookup(BACKEND_ENV) {
            config.backend = backend.parse()?;
        }
        config.id_field = lookup(ID_FIELD_ENV);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.id_field {
            Some(field) if field.trim().is_empty() => Err(ConfigError::EmptyIdField),
            _ => Ok(()),
        }
    }

    pub fn resolved_id_field(&self) -> &str {
        match &self.id_field {
            Some(field) if !field.trim().is_empty() => field.as_str(),
            _ => self.backend.default_id_field(),
        }
    }

    /// Makes this configuration's backend the process-wide default.
    pub fn install(&self) {
        set_default_backend(self.backend);
    }
}
