//! Query encoding error types

/// Errors raised while encoding a query description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The filter key has no field part (e.g. `"__eq"`).
    #[error("Filter key '{key}' has an empty field name")]
    EmptyField { key: String },

    /// The filter key ends with `__` and names no operator.
    #[error("Filter key '{key}' has an empty operator")]
    EmptyOperator { key: String },

    /// The operator has no complement, so the condition cannot be excluded.
    #[error("Operator '{op}' cannot be negated")]
    NotNegatable { op: String },
}
