//! Latency SLA measurement.
//!
//! The engine enforces no timeouts internally, so latency bounds are
//! proved from the outside by measurement.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

pub const DEFAULT_SLA_THRESHOLD_MS: f64 = 75.0;

/// Wall-clock latency summary for a benchmarked operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaReport {
    pub iterations: usize,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub max_ms: f64,
    pub threshold_ms: f64,
    pub sla_compliant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SlaReport {
    fn failed(threshold_ms: f64, error: String) -> Self {
        Self {
            iterations: 0,
            p50_ms: 0.0,
            p95_ms: 0.0,
            max_ms: 0.0,
            threshold_ms,
            sla_compliant: false,
            error: Some(error),
        }
    }
}

/// Measure p50/p95/max latency of `run` over `iterations` executions
/// against the same series. Compliance means the p95 stays under the
/// threshold. An error from `run` aborts the measurement with
/// `sla_compliant = false` instead of reporting partial timings.
pub fn sla_benchmark<F, T, E>(
    series: &[f64],
    mut run: F,
    iterations: usize,
    threshold_ms: f64,
) -> SlaReport
where
    F: FnMut(&[f64]) -> Result<T, E>,
    E: std::fmt::Display,
{
    if iterations == 0 {
        return SlaReport::failed(threshold_ms, "iterations must be at least 1".to_string());
    }

    let mut timings_ms = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let started = Instant::now();
        if let Err(e) = run(series) {
            warn!(error = %e, "benchmarked operation failed, aborting measurement");
            return SlaReport::failed(threshold_ms, e.to_string());
        }
        timings_ms.push(started.elapsed().as_secs_f64() * 1000.0);
    }

    timings_ms.sort_by(f64::total_cmp);
    let p95 = percentile(&timings_ms, 95.0);
    SlaReport {
        iterations,
        p50_ms: percentile(&timings_ms, 50.0),
        p95_ms: p95,
        max_ms: timings_ms.last().copied().unwrap_or(0.0),
        threshold_ms,
        sla_compliant: p95 < threshold_ms,
        error: None,
    }
}

/// Nearest-rank percentile over pre-sorted timings.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (pct / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
