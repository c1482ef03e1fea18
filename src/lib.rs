//! Deterministic numerical core for labour-market policy analysis.
//!
//! Two engines over in-memory time series. The pattern miner discovers
//! statistically stable driver-outcome relationships across rolling
//! windows and cohorts (rank correlation, seasonal lift, stability
//! scoring). The scenario engine parses a small validated transform DSL,
//! applies transforms sequentially over a supplied baseline forecast,
//! rolls sector results up to a national series, and backtests the
//! output. Everything is synchronous, stateless per call, and free of
//! I/O; results come back wrapped in provenance-carrying
//! [`models::DerivedResult`]s so downstream narrative layers can cite
//! them.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod patterns;
pub mod qa;
pub mod scenario;
