//! Weighted roll-up of sector scenario outputs to a national series.

use std::collections::HashMap;

use crate::models::derived::{DerivedResult, IdHasher};
use crate::scenario::error::ScenarioError;
use crate::scenario::interpreter::ScenarioRow;

/// One sector's scenario output feeding the national roll-up.
#[derive(Debug, Clone)]
pub struct SectorSeries {
    pub sector: String,
    /// Derived-result id of the sector run, when it came from one.
    pub source_id: Option<String>,
    pub rows: Vec<ScenarioRow>,
}

impl SectorSeries {
    pub fn new(sector: impl Into<String>, rows: Vec<ScenarioRow>) -> Self {
        Self {
            sector: sector.into(),
            source_id: None,
            rows,
        }
    }

    /// Capture a sector scenario result, keeping its id for provenance.
    pub fn from_result(sector: impl Into<String>, result: &DerivedResult<ScenarioRow>) -> Self {
        Self {
            sector: sector.into(),
            source_id: Some(result.id.clone()),
            rows: result.rows.clone(),
        }
    }
}

/// Roll sector scenario outputs up to a national series.
///
/// Every sector must contribute the same number of rows; mismatched
/// horizons signal upstream corruption and fail the call. Weights
/// default to equal and are re-normalized to sum to 1 when supplied; a
/// sector absent from the weight map contributes nothing. Non-finite
/// per-sector values are skipped as zero contribution rather than
/// poisoning the whole roll-up.
pub fn cascade_sector_to_national(
    sectors: &[SectorSeries],
    weights: Option<&HashMap<String, f64>>,
) -> Result<DerivedResult<ScenarioRow>, ScenarioError> {
    if sectors.is_empty() {
        return Err(ScenarioError::EmptyCascade);
    }
    let expected = sectors[0].rows.len();
    for sector in &sectors[1..] {
        if sector.rows.len() != expected {
            return Err(ScenarioError::HorizonMismatch {
                sector: sector.sector.clone(),
                len: sector.rows.len(),
                expected,
            });
        }
    }

    let normalized = normalize_weights(sectors, weights);
    let mut rows = Vec::with_capacity(expected);
    for i in 0..expected {
        let mut baseline = 0.0;
        let mut adjusted = 0.0;
        for (sector, &weight) in sectors.iter().zip(&normalized) {
            let row = &sector.rows[i];
            if row.baseline.is_finite() {
                baseline += weight * row.baseline;
            }
            if row.adjusted.is_finite() {
                adjusted += weight * row.adjusted;
            }
        }
        let delta = adjusted - baseline;
        let delta_pct = if baseline != 0.0 {
            delta / baseline * 100.0
        } else {
            0.0
        };
        rows.push(ScenarioRow {
            h: i + 1,
            label: sectors[0].rows[i].label.clone(),
            baseline,
            adjusted,
            delta,
            delta_pct,
        });
    }

    let sources: Vec<String> = sectors
        .iter()
        .map(|s| s.source_id.clone().unwrap_or_else(|| s.sector.clone()))
        .collect();
    let mut hasher = IdHasher::new("cascade");
    for (sector, &weight) in sectors.iter().zip(&normalized) {
        hasher.write_str(&sector.sector);
        hasher.write_f64(weight);
    }
    for row in &rows {
        hasher.write_usize(row.h);
        hasher.write_f64(row.baseline);
        hasher.write_f64(row.adjusted);
    }
    Ok(DerivedResult::new(
        hasher.finish(),
        rows,
        "national",
        sources,
    ))
}

fn normalize_weights(
    sectors: &[SectorSeries],
    weights: Option<&HashMap<String, f64>>,
) -> Vec<f64> {
    let n = sectors.len();
    let equal = vec![1.0 / n as f64; n];
    let Some(map) = weights else {
        return equal;
    };
    let raw: Vec<f64> = sectors
        .iter()
        .map(|s| {
            map.get(&s.sector)
                .copied()
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(0.0)
        })
        .collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return equal;
    }
    raw.iter().map(|w| w / total).collect()
}
