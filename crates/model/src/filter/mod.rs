use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub mod document;
pub mod expr;

use document::Document;
use expr::Expr;

/// The backend a builder compiles for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    #[serde(alias = "mongo")]
    Document,
    #[serde(alias = "sql", alias = "gorm")]
    Relational,
}

impl Backend {
    /// Field targeted by `Id` conditions unless configured otherwise.
    pub fn default_id_field(&self) -> &'static str {
        match self {
            Backend::Document => "_id",
            Backend::Relational => "id",
        }
    }
}

impl FromStr for Backend {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "mongo" => Ok(Backend::Document),
            "relational" | "sql" | "gorm" => Ok(Backend::Relational),
            _ => Err(ModelError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Document => write!(f, "document"),
            Backend::Relational => write!(f, "relational"),
        }
    }
}

/// A compiled, backend-native filter.
///
/// Consumers hand this to their driver without looking inside. The neutral
/// filter is `Relational(None)` (no WHERE clause) or an empty document
/// (match everything).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Relational(Option<Expr>),
    Document(Document),
}

impl Filter {
    pub fn backend(&self) -> Backend {
        match self {
            Filter::Relational(_) => Backend::Relational,
            Filter::Document(_) => Backend::Document,
        }
    }

    pub fn is_neutral(&self) -> bool {
        match self {
            Filter::Relational(expr) => expr.is_none(),
            Filter::Document(doc) => doc.is_empty(),
        }
    }

    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Filter::Relational(expr) => expr.as_ref(),
            Filter::Document(_) => None,
        }
    }

    pub fn into_expr(self) -> Option<Expr> {
        match self {
            Filter::Relational(expr) => expr,
            Filter::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Filter::Document(doc) => Some(doc),
            Filter::Relational(_) => None,
        }
    }

    pub fn into_document(self) -> Option<Document> {
        match self {
            Filter::Document(doc) => Some(doc),
            Filter::Relational(_) => None,
        }
    }
}

impl From<Expr> for Filter {
    fn from(expr: Expr) -> Self {
        Filter::Relational(Some(expr))
    }
}

impl From<Document> for Filter {
    fn from(doc: Document) -> Self {
        Filter::Document(doc)
    }
}

/// Anything that can produce a compiled filter, typically a query builder.
///
/// Nested builders are stored behind this trait so a logical group can hold
/// them without knowing which builder type produced them.
pub trait FilterSource: fmt::Debug + Send + Sync {
    fn build(&self) -> Filter;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("document".parse::<Backend>(), Ok(Backend::Document));
        assert_eq!("Mongo".parse::<Backend>(), Ok(Backend::Document));
        assert_eq!(" SQL ".parse::<Backend>(), Ok(Backend::Relational));
        assert_eq!("gorm".parse::<Backend>(), Ok(Backend::Relational));
        assert_eq!(
            "redis".parse::<Backend>(),
            Err(ModelError::UnknownBackend("redis".to_string()))
        );
    }

    #[test]
    fn test_backend_serde_aliases() {
        let backend: Backend = serde_json::from_str(r#""sql""#).unwrap();
        assert_eq!(backend, Backend::Relational);
        assert_eq!(serde_json::to_string(&Backend::Document).unwrap(), r#""document""#);
    }

    #[test]
    fn test_neutral_filters() {
        assert!(Filter::Relational(None).is_neutral());
        assert!(Filter::Document(Document::new()).is_neutral());
        assert!(!Filter::from(Expr::eq("a", 1)).is_neutral());
    }
}
