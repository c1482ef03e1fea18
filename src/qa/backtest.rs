//! Forecast backtesting error metrics.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::qa::error::QaError;

const NEAR_ZERO: f64 = 1e-9;

/// Mean absolute error. Returns 0.0 on empty or mismatched input.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Mean absolute percentage error. Terms with a near-zero actual are
/// skipped rather than dividing by nothing.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return 0.0;
    }
    let mut total = 0.0;
    let mut count = 0usize;
    for (a, p) in actual.iter().zip(predicted) {
        if a.abs() < NEAR_ZERO {
            continue;
        }
        total += ((a - p) / a).abs();
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    total / count as f64 * 100.0
}

/// Symmetric mean absolute percentage error. Pairs where both sides are
/// near zero contribute 0, so a flat-zero stretch reads as a perfect
/// forecast instead of an undefined one.
pub fn smape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return 0.0;
    }
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let denom = (a.abs() + p.abs()) / 2.0;
            if denom < NEAR_ZERO {
                0.0
            } else {
                (a - p).abs() / denom
            }
        })
        .sum();
    total / actual.len() as f64 * 100.0
}

/// Error metrics for one forecast against realized values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub mae: f64,
    pub mape: f64,
    pub smape: f64,
    pub n: usize,
}

/// Score a single forecast. Both series must be non-empty and of equal
/// length.
pub fn backtest_forecast(actual: &[f64], predicted: &[f64]) -> Result<BacktestReport, QaError> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(QaError::EmptySeries);
    }
    if actual.len() != predicted.len() {
        return Err(QaError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    Ok(BacktestReport {
        mae: mae(actual, predicted),
        mape: mape(actual, predicted),
        smape: smape(actual, predicted),
        n: actual.len(),
    })
}

/// Rolling-origin backtest.
///
/// The origin walks forward one step at a time from `min_train` to
/// `series.len() - horizon`; at each origin `forecast` sees the history
/// so far and must return `horizon` predictions. Actual/predicted pairs
/// are pooled across all origins into one report. A failing origin is
/// logged and skipped; the call errors only when every origin fails.
pub fn rolling_window_backtest<F, E>(
    series: &[f64],
    min_train: usize,
    horizon: usize,
    mut forecast: F,
) -> Result<BacktestReport, QaError>
where
    F: FnMut(&[f64], usize) -> Result<Vec<f64>, E>,
    E: std::fmt::Display,
{
    if min_train == 0 || horizon == 0 {
        return Err(QaError::DegenerateWalk);
    }
    if series.len() < min_train + horizon {
        return Err(QaError::SeriesTooShort {
            len: series.len(),
            required: min_train + horizon,
        });
    }

    let mut actual_all = Vec::new();
    let mut predicted_all = Vec::new();
    let mut failed = 0usize;
    for origin in min_train..=(series.len() - horizon) {
        match forecast(&series[..origin], horizon) {
            Ok(predicted) if predicted.len() == horizon => {
                actual_all.extend_from_slice(&series[origin..origin + horizon]);
                predicted_all.extend(predicted);
            }
            Ok(predicted) => {
                warn!(
                    origin,
                    got = predicted.len(),
                    horizon,
                    "forecast returned wrong horizon, skipping origin"
                );
                failed += 1;
            }
            Err(e) => {
                warn!(origin, error = %e, "forecast failed, skipping origin");
                failed += 1;
            }
        }
    }

    if actual_all.is_empty() {
        return Err(QaError::AllOriginsFailed { failed });
    }
    backtest_forecast(&actual_all, &predicted_all)
}
