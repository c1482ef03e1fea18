//! Sequential scenario application over a baseline forecast.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::derived::{DerivedResult, IdHasher};
use crate::models::scenario::{ScenarioSpec, Transform, TransformKind};
use crate::models::series::{
    discover_value_field, numeric_field, row_date, SeriesRow, BASELINE_VALUE_FIELDS,
};
use crate::scenario::error::ScenarioError;
use crate::scenario::transforms::{
    apply_additive, apply_clamp, apply_growth_override, apply_multiplicative,
};

/// One adjusted period of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    /// 1-based horizon index.
    pub h: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub baseline: f64,
    pub adjusted: f64,
    pub delta: f64,
    pub delta_pct: f64,
}

/// Dispatch one transform onto the working value array.
pub fn apply_transform(values: &mut [f64], transform: &Transform) {
    match transform.kind {
        TransformKind::Additive => apply_additive(
            values,
            transform.value,
            transform.start_month,
            transform.end_month,
        ),
        TransformKind::Multiplicative => apply_multiplicative(
            values,
            transform.value,
            transform.start_month,
            transform.end_month,
        ),
        TransformKind::GrowthOverride => apply_growth_override(
            values,
            transform.value,
            transform.start_month,
            transform.end_month,
        ),
        TransformKind::Clamp => apply_clamp(values, transform.min, transform.max),
    }
}

/// Run a validated scenario against a baseline forecast.
///
/// Transforms apply strictly in list order, so `+10 then x1.1` and
/// `x1.1 then +10` produce different trajectories. A baseline shorter
/// than the horizon degrades to the available periods with a warning; a
/// missing, non-numeric, or non-finite value column is an error, since
/// it signals corrupted upstream data rather than thin data.
pub fn apply_scenario(
    baseline: &[SeriesRow],
    spec: &ScenarioSpec,
    date_labels: Option<&[String]>,
) -> Result<DerivedResult<ScenarioRow>, ScenarioError> {
    if baseline.is_empty() {
        return Err(ScenarioError::EmptyBaseline);
    }
    let field = discover_value_field(&baseline[0], &BASELINE_VALUE_FIELDS).ok_or(
        ScenarioError::MissingValueColumn {
            tried: BASELINE_VALUE_FIELDS.to_vec(),
        },
    )?;

    let mut values = Vec::with_capacity(baseline.len());
    for (index, row) in baseline.iter().enumerate() {
        let value = numeric_field(row, field).ok_or_else(|| ScenarioError::NonNumericValue {
            field: field.to_string(),
            index,
        })?;
        if !value.is_finite() {
            return Err(ScenarioError::NonFiniteValue {
                field: field.to_string(),
                value,
                index,
            });
        }
        values.push(value);
    }

    let mut warnings = Vec::new();
    let horizon = spec.horizon_months as usize;
    if values.len() > horizon {
        values.truncate(horizon);
    } else if values.len() < horizon {
        warn!(
            baseline_len = values.len(),
            horizon,
            scenario = %spec.name,
            "baseline shorter than scenario horizon"
        );
        warnings.push(format!(
            "baseline provides {} periods for a {horizon}-month horizon",
            values.len()
        ));
    }

    let original = values.clone();
    for transform in &spec.transforms {
        apply_transform(&mut values, transform);
    }
    apply_clamp(&mut values, spec.clamp_min, spec.clamp_max);

    let rows: Vec<ScenarioRow> = original
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(i, (&base, &adjusted))| {
            let delta = adjusted - base;
            let delta_pct = if base != 0.0 { delta / base * 100.0 } else { 0.0 };
            ScenarioRow {
                h: i + 1,
                label: date_labels.and_then(|labels| labels.get(i).cloned()),
                baseline: base,
                adjusted,
                delta,
                delta_pct,
            }
        })
        .collect();

    let freshness = baseline.last().and_then(row_date).map(|d| d.to_string());
    let id = scenario_result_id(spec, &rows);
    let mut result = DerivedResult::new(id, rows, spec.metric.clone(), vec![spec.name.clone()])
        .with_warnings(warnings);
    result.freshness = freshness;
    Ok(result)
}

fn scenario_result_id(spec: &ScenarioSpec, rows: &[ScenarioRow]) -> String {
    let mut hasher = IdHasher::new("scenario");
    hasher.write_str(&spec.name);
    hasher.write_str(&spec.metric);
    hasher.write_str(spec.sector.as_deref().unwrap_or(""));
    hasher.write_usize(spec.horizon_months as usize);
    for transform in &spec.transforms {
        hasher.write_usize(transform.kind as usize);
        hasher.write_f64(transform.value);
        hasher.write_usize(transform.start_month);
        hasher.write_opt_usize(transform.end_month);
        hasher.write_opt_f64(transform.min);
        hasher.write_opt_f64(transform.max);
    }
    hasher.write_opt_f64(spec.clamp_min);
    hasher.write_opt_f64(spec.clamp_max);
    for row in rows {
        hasher.write_usize(row.h);
        hasher.write_f64(row.baseline);
        hasher.write_f64(row.adjusted);
    }
    hasher.finish()
}
