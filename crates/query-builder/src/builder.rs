use crate::config::{QueryConfig, default_backend};
use compiler::pattern::compile_pattern;
use model::{
    core::value::Value,
    filter::{Backend, Filter, FilterSource},
    query::{Condition, GroupMember, LogicalKind, MatchMode, QueryConditions},
};

/// Chained query builder bound to one backend.
///
/// Every call appends to the condition model; [`build`](Self::build) compiles
/// it without consuming or changing it, so it can be called any number of
/// times.
///
/// ```ignore
/// let filter = QueryBuilder::for_backend(Backend::Document)
///     .gt("age", 18)
///     .lt("age", 30)
///     .like("name", "jo", MatchMode::StartsWith)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    backend: Backend,
    id_field: String,
    conditions: QueryConditions,
}

impl QueryBuilder {
    /// Creates a builder for the process-wide default backend.
    pub fn new() -> Self {
        Self::for_backend(default_backend())
    }

    pub fn for_backend(backend: Backend) -> Self {
        Self {
            backend,
            id_field: backend.default_id_field().to_string(),
            conditions: QueryConditions::new(),
        }
    }

    pub fn with_config(config: &QueryConfig) -> Self {
        Self {
            backend: config.backend,
            id_field: config.resolved_id_field().to_string(),
            conditions: QueryConditions::new(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn conditions(&self) -> &QueryConditions {
        &self.conditions
    }

    pub fn id(mut self, id: impl Into<Value>) -> Self {
        self.conditions
            .add_condition(&self.id_field, Condition::eq(id));
        self
    }

    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.condition(field, Condition::eq(value))
    }

    pub fn ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.condition(field, Condition::ne(value))
    }

    pub fn gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.condition(field, Condition::gt(value))
    }

    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.condition(field, Condition::gte(value))
    }

    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.condition(field, Condition::lt(value))
    }

    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.condition(field, Condition::lte(value))
    }

    pub fn in_<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.condition(field, Condition::in_list(values))
    }

    pub fn nin<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.condition(field, Condition::not_in(values))
    }

    /// Fuzzy match, compiled to a `LIKE` pattern or a case-insensitive
    /// regular expression depending on the backend.
    pub fn like(self, field: &str, value: &str, mode: MatchMode) -> Self {
        let pattern = compile_pattern(self.backend, value, mode);
        self.condition(field, Condition::like(pattern))
    }

    pub fn and<I>(self, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<GroupMember>,
    {
        self.group(LogicalKind::And, members)
    }

    pub fn or<I>(self, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<GroupMember>,
    {
        self.group(LogicalKind::Or, members)
    }

    pub fn build(&self) -> Filter {
        compiler::compile(self.backend, &self.conditions)
    }

    fn condition(mut self, field: &str, condition: Condition) -> Self {
        self.conditions.add_condition(field, condition);
        self
    }

    fn group<I>(mut self, kind: LogicalKind, members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<GroupMember>,
    {
        self.conditions
            .add_logical_group(kind, members.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSource for QueryBuilder {
    fn build(&self) -> Filter {
        QueryBuilder::build(self)
    }
}

impl From<QueryBuilder> for GroupMember {
    fn from(builder: QueryBuilder) -> Self {
        GroupMember::nested(builder)
    }
}
