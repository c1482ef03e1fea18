pub mod backtest;
pub mod benchmark;
pub mod error;
pub mod stability;

pub use backtest::{backtest_forecast, rolling_window_backtest, BacktestReport};
pub use benchmark::{sla_benchmark, SlaReport, DEFAULT_SLA_THRESHOLD_MS};
pub use error::QaError;
pub use stability::{stability_check, StabilityFlag, StabilityReport, DEFAULT_STABILITY_WINDOW};
