//! Volatility and reversal flags for adjusted series.

use serde::{Deserialize, Serialize};

pub const DEFAULT_STABILITY_WINDOW: usize = 6;

const CV_THRESHOLD: f64 = 0.5;
const RANGE_RATIO_THRESHOLD: f64 = 5.0;

/// Why a series was flagged unstable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityFlag {
    HighVolatility,
    FrequentReversals,
    RangeExplosion,
}

impl StabilityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityFlag::HighVolatility => "high_volatility",
            StabilityFlag::FrequentReversals => "frequent_reversals",
            StabilityFlag::RangeExplosion => "range_explosion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    pub stable: bool,
    pub flags: Vec<StabilityFlag>,
    /// Coefficient of variation: std dev over |mean|.
    pub cv: f64,
    /// Sign changes in the first differences.
    pub reversals: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_ratio: Option<f64>,
    pub n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Flag erratic behavior in a (typically scenario-adjusted) series.
///
/// Series shorter than `window` are reported stable with an
/// insufficient-data note; a short series has nothing to flag yet.
pub fn stability_check(values: &[f64], window: usize) -> StabilityReport {
    let n = values.len();
    if n < window {
        return StabilityReport {
            stable: true,
            flags: Vec::new(),
            cv: 0.0,
            reversals: 0,
            range_ratio: None,
            n,
            note: Some("insufficient data".to_string()),
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
    let cv = if mean.abs() < 1e-9 {
        0.0
    } else {
        variance.sqrt() / mean.abs()
    };

    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let reversals = diffs
        .windows(2)
        .filter(|pair| pair[0] * pair[1] < 0.0)
        .count();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range_ratio = if min > 0.0 { Some(max / min) } else { None };

    let mut flags = Vec::new();
    if cv > CV_THRESHOLD {
        flags.push(StabilityFlag::HighVolatility);
    }
    if reversals > n / 3 {
        flags.push(StabilityFlag::FrequentReversals);
    }
    if let Some(ratio) = range_ratio {
        if ratio > RANGE_RATIO_THRESHOLD {
            flags.push(StabilityFlag::RangeExplosion);
        }
    }

    StabilityReport {
        stable: flags.is_empty(),
        flags,
        cv,
        reversals,
        range_ratio,
        n,
        note: None,
    }
}
