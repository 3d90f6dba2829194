//! Relational filter expression tree.
//!
//! The tree is a logical description of a WHERE condition. It carries column
//! references and bound values only; quoting and placeholders are left to
//! whatever renders it for a concrete engine.

use crate::core::value::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn column(name: &str) -> Self {
        Ident {
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,    // =
    NotEq, // <>
    Gt,    // >
    GtEq,  // >=
    Lt,    // <
    LtEq,  // <=
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::NotEq => "<>",
            Comparator::Gt => ">",
            Comparator::GtEq => ">=",
            Comparator::Lt => "<",
            Comparator::LtEq => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `column <op> value`
    Compare {
        column: Ident,
        op: Comparator,
        value: Value,
    },

    /// `column IN (values...)`
    In { column: Ident, values: Vec<Value> },

    /// `column LIKE pattern`, the pattern already carries its wildcards.
    Like { column: Ident, pattern: String },

    Not(Box<Expr>),

    And(Vec<Expr>),

    Or(Vec<Expr>),
}

impl Expr {
    pub fn compare(column: &str, op: Comparator, value: impl Into<Value>) -> Self {
        Expr::Compare {
            column: Ident::column(column),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::compare(column, Comparator::Eq, value)
    }

    pub fn in_list(column: &str, values: Vec<Value>) -> Self {
        Expr::In {
            column: Ident::column(column),
            values,
        }
    }

    pub fn like(column: &str, pattern: &str) -> Self {
        Expr::Like {
            column: Ident::column(column),
            pattern: pattern.to_string(),
        }
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    pub fn and(children: Vec<Expr>) -> Self {
        Expr::And(children)
    }

    pub fn or(children: Vec<Expr>) -> Self {
        Expr::Or(children)
    }

    /// Children of a conjunction or disjunction, empty for leaf predicates.
    pub fn children(&self) -> &[Expr] {
        match self {
            Expr::And(children) | Expr::Or(children) => children,
            _ => &[],
        }
    }
}
