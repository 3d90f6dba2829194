//! The backend-independent condition model a builder accumulates.

use crate::{
    core::value::Value,
    filter::{Filter, FilterSource, document::Document, expr::Expr},
    query::condition::Condition,
};
use std::sync::Arc;
use tracing::warn;

/// Conditions grouped by field, in first-seen field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldConditions {
    entries: Vec<(String, Vec<Condition>)>,
}

impl FieldConditions {
    pub fn push(&mut self, field: &str, condition: Condition) {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, conditions)) => conditions.push(condition),
            None => self.entries.push((field.to_string(), vec![condition])),
        }
    }

    pub fn get(&self, field: &str) -> Option<&[Condition]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, conditions)| conditions.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Condition])> {
        self.entries
            .iter()
            .map(|(name, conditions)| (name.as_str(), conditions.as_slice()))
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of conditions across all fields.
    pub fn condition_count(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKind {
    And,
    Or,
}

impl LogicalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalKind::And => "and",
            LogicalKind::Or => "or",
        }
    }
}

/// One member of a logical group.
#[derive(Debug, Clone)]
pub enum GroupMember {
    /// Equality shorthand: every key must equal its value.
    KeyValue(Vec<(String, Value)>),
    /// A filter that is already in backend-native form.
    Raw(Filter),
    /// Another builder, compiled through its own `build`.
    Nested(Arc<dyn FilterSource>),
}

impl GroupMember {
    pub fn key_value<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        GroupMember::KeyValue(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn nested(source: impl FilterSource + 'static) -> Self {
        GroupMember::Nested(Arc::new(source))
    }
}

impl From<Filter> for GroupMember {
    fn from(filter: Filter) -> Self {
        GroupMember::Raw(filter)
    }
}

impl From<Expr> for GroupMember {
    fn from(expr: Expr) -> Self {
        GroupMember::Raw(Filter::from(expr))
    }
}

impl From<Document> for GroupMember {
    fn from(doc: Document) -> Self {
        GroupMember::Raw(Filter::from(doc))
    }
}

#[derive(Debug, Clone)]
pub struct LogicalGroup {
    pub kind: LogicalKind,
    pub members: Vec<GroupMember>,
}

/// Field conditions plus logical groups for one builder.
///
/// Compilers only read it, so compiling the same instance twice gives the
/// same filter.
#[derive(Debug, Clone, Default)]
pub struct QueryConditions {
    fields: FieldConditions,
    groups: Vec<LogicalGroup>,
}

impl QueryConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `condition` to `field`. Conditions are never deduplicated.
    ///
    /// A condition on an empty field name cannot address anything and is
    /// skipped.
    pub fn add_condition(&mut self, field: &str, condition: Condition) {
        if field.is_empty() {
            warn!("Skipping `{}` condition with an empty field name", condition.op());
            return;
        }
        self.fields.push(field, condition);
    }

    pub fn add_logical_group(&mut self, kind: LogicalKind, members: Vec<GroupMember>) {
        self.groups.push(LogicalGroup { kind, members });
    }

    pub fn fields(&self) -> &FieldConditions {
        &self.fields
    }

    pub fn groups(&self) -> &[LogicalGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.groups.is_empty()
    }
}
