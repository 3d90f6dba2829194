pub mod filter;
pub mod pattern;
pub mod render;

pub use filter::{compile, compiler::FilterCompiler, document::DocumentFilterCompiler, sql::SqlFilterCompiler};
