use thiserror::Error;

/// Errors raised by the backtesting harness.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QaError {
    #[error("actual and predicted series must be non-empty")]
    EmptySeries,

    #[error("length mismatch: {actual} actual vs {predicted} predicted")]
    LengthMismatch { actual: usize, predicted: usize },

    #[error("min_train and horizon must be at least 1")]
    DegenerateWalk,

    #[error("series of {len} points cannot back a test needing {required}")]
    SeriesTooShort { len: usize, required: usize },

    #[error("every backtest origin failed ({failed} attempts)")]
    AllOriginsFailed { failed: usize },
}
