use self::{compiler::FilterCompiler, document::DocumentFilterCompiler, sql::SqlFilterCompiler};
use model::{
    filter::{Backend, Filter},
    query::QueryConditions,
};

pub mod compiler;
pub mod document;
pub mod sql;

/// Compiles `conditions` with the compiler for `backend`.
pub fn compile(backend: Backend, conditions: &QueryConditions) -> Filter {
    match backend {
        Backend::Relational => Filter::Relational(SqlFilterCompiler::compile(conditions)),
        Backend::Document => Filter::Document(DocumentFilterCompiler::compile(conditions)),
    }
}
