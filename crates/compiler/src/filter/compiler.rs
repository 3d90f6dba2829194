use model::query::QueryConditions;

/// A trait for compiling the condition model into a specific filter format.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the accumulated conditions into a filter.
    ///
    /// Compilation is total: anything the target cannot express is dropped
    /// rather than reported.
    fn compile(conditions: &QueryConditions) -> Self::Filter;
}
