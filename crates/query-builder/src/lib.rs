//! Backend-agnostic query conditions.
//!
//! A [`QueryBuilder`] collects field conditions and logical groups, then
//! compiles them into either a relational expression tree or a document
//! filter, depending on the backend it is bound to.

pub mod builder;
pub mod config;
pub mod error;
pub mod shorthand;

pub use builder::QueryBuilder;
pub use config::{QueryConfig, default_backend, set_default_backend};
pub use compiler::render::{
    dialect::{Dialect, MySql, Postgres},
    render_condition, render_where,
};
pub use error::ConfigError;
pub use model::{
    core::value::Value,
    filter::{Backend, Filter, FilterSource, document::Document, expr::Expr},
    query::{GroupMember, LogicalKind, MatchMode},
};
