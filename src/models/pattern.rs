//! Pattern-mining query and finding models.

use serde::{Deserialize, Serialize};

use crate::patterns::error::PatternError;

/// Supported lookback windows, in months.
pub const ALLOWED_WINDOWS: [u32; 4] = [3, 6, 12, 24];

/// Correlation method used to score a driver-outcome relationship.
///
/// Spearman is the default upstream because it is robust to outliers and
/// captures monotonic, not just linear, relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
}

/// Direction of a mined relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "pos")]
    Positive,
    #[serde(rename = "neg")]
    Negative,
    #[serde(rename = "nonlinear")]
    Nonlinear,
    #[serde(rename = "flat")]
    Flat,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Positive => "pos",
            Direction::Negative => "neg",
            Direction::Nonlinear => "nonlinear",
            Direction::Flat => "flat",
        }
    }
}

/// Immutable pattern-mining query descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub outcome: String,
    pub drivers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub window: u32,
    pub min_support: usize,
    pub method: CorrelationMethod,
}

impl PatternSpec {
    /// Build a validated query. Window must be one of the supported
    /// lookbacks and at least one driver is required.
    pub fn new(
        outcome: impl Into<String>,
        drivers: Vec<String>,
        sector: Option<String>,
        window: u32,
        min_support: usize,
        method: CorrelationMethod,
    ) -> Result<Self, PatternError> {
        if !ALLOWED_WINDOWS.contains(&window) {
            return Err(PatternError::InvalidWindow(window));
        }
        if drivers.is_empty() {
            return Err(PatternError::NoDrivers);
        }
        if min_support == 0 {
            return Err(PatternError::ZeroMinSupport);
        }
        Ok(Self {
            outcome: outcome.into(),
            drivers,
            sector,
            window,
            min_support,
            method,
        })
    }
}

/// A single driver-outcome relationship surfaced by the miner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternFinding {
    pub driver: String,
    /// Correlation in [-1, 1], or a lift percentage for seasonal effects.
    pub effect: f64,
    pub support: f64,
    pub stability: f64,
    pub direction: Direction,
    pub cohort: String,
    pub n: usize,
    pub seasonally_adjusted: bool,
}
