//! Single-shot filters on the process-wide default backend.
//!
//! Each function builds a throwaway [`QueryBuilder`], applies one call and
//! compiles it.

use crate::builder::QueryBuilder;
use model::{
    core::value::Value,
    filter::Filter,
    query::{GroupMember, MatchMode},
};

pub fn id(id: impl Into<Value>) -> Filter {
    QueryBuilder::new().id(id).build()
}

pub fn eq(field: &str, value: impl Into<Value>) -> Filter {
    QueryBuilder::new().eq(field, value).build()
}

pub fn ne(field: &str, value: impl Into<Value>) -> Filter {
    QueryBuilder::new().ne(field, value).build()
}

pub fn gt(field: &str, value: impl Into<Value>) -> Filter {
    QueryBuilder::new().gt(field, value).build()
}

pub fn gte(field: &str, value: impl Into<Value>) -> Filter {
    QueryBuilder::new().gte(field, value).build()
}

pub fn lt(field: &str, value: impl Into<Value>) -> Filter {
    QueryBuilder::new().lt(field, value).build()
}

pub fn lte(field: &str, value: impl Into<Value>) -> Filter {
    QueryBuilder::new().lte(field, value).build()
}

pub fn in_<I>(field: &str, values: I) -> Filter
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    QueryBuilder::new().in_(field, values).build()
}

pub fn nin<I>(field: &str, values: I) -> Filter
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    QueryBuilder::new().nin(field, values).build()
}

pub fn like(field: &str, value: &str, mode: MatchMode) -> Filter {
    QueryBuilder::new().like(field, value, mode).build()
}

pub fn and<I>(members: I) -> Filter
where
    I: IntoIterator,
    I::Item: Into<GroupMember>,
{
    QueryBuilder::new().and(members).build()
}

pub fn or<I>(members: I) -> Filter
where
    I: IntoIterator,
    I::Item: Into<GroupMember>,
{
    QueryBuilder::new().or(members).build()
}
