use thiserror::Error;

/// Errors raised by the scenario DSL, interpreter, and cascade.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// A scenario spec was rejected. Both syntax errors in the source
    /// text and business-rule violations surface through this single
    /// category; the message carries the specifics.
    #[error("invalid scenario spec: {0}")]
    InvalidSpec(String),

    #[error("baseline has no value column (tried {tried:?})")]
    MissingValueColumn { tried: Vec<&'static str> },

    #[error("non-numeric value in field '{field}' at row {index}")]
    NonNumericValue { field: String, index: usize },

    #[error("non-finite value {value} in field '{field}' at row {index}")]
    NonFiniteValue {
        field: String,
        value: f64,
        index: usize,
    },

    #[error("empty baseline: no rows to adjust")]
    EmptyBaseline,

    #[error("sector '{sector}' has {len} rows, expected {expected}")]
    HorizonMismatch {
        sector: String,
        len: usize,
        expected: usize,
    },

    #[error("cascade requires at least one sector result")]
    EmptyCascade,
}
