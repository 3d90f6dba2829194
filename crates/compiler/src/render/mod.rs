//! Renders a relational filter into a parameterized WHERE condition.
//!
//! Compilation never produces text. Consumers that talk to a driver taking
//! SQL strings render the compiled tree here instead.

use dialect::Dialect;
use model::{core::value::Value, filter::expr::Expr};

pub mod dialect;
pub mod expr;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the SQL text and its bound parameters.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }
}

/// Renders `expr` as a standalone condition, without the `WHERE` keyword.
pub fn render_condition(expr: &Expr, dialect: &dyn Dialect) -> (String, Vec<Value>) {
    let mut renderer = Renderer::new(dialect);
    expr.render(&mut renderer);
    renderer.finish()
}

/// Renders a whole WHERE clause. The neutral filter renders to an empty
/// clause with no parameters.
pub fn render_where(filter: Option<&Expr>, dialect: &dyn Dialect) -> (String, Vec<Value>) {
    match filter {
        Some(expr) => {
            let (sql, params) = render_condition(expr, dialect);
            (format!("WHERE {sql}"), params)
        }
        None => (String::new(), Vec::new()),
    }
}
