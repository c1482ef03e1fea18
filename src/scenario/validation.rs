//! Business-rule validation for scenario value objects.
//!
//! Construction-time checks, run exactly once per spec: by the factory
//! constructors for in-process callers and by the parser for
//! deserialized input.

use crate::models::scenario::{ScenarioSpec, Transform, TransformKind};
use crate::scenario::error::ScenarioError;

pub const MIN_HORIZON_MONTHS: u32 = 1;
pub const MAX_HORIZON_MONTHS: u32 = 96;
pub const MAX_TRANSFORMS: usize = 10;

fn rejected(reason: impl Into<String>) -> ScenarioError {
    ScenarioError::InvalidSpec(reason.into())
}

pub fn validate_transform(transform: &Transform) -> Result<(), ScenarioError> {
    if !transform.value.is_finite() {
        return Err(rejected(format!(
            "transform value {} is not finite",
            transform.value
        )));
    }
    if transform.kind == TransformKind::Multiplicative
        && !(0.0..=1.0).contains(&transform.value)
    {
        return Err(rejected(format!(
            "multiplicative rate {} must be within [0, 1]",
            transform.value
        )));
    }
    if let Some(end) = transform.end_month {
        if end < transform.start_month {
            return Err(rejected(format!(
                "end_month {} precedes start_month {}",
                end, transform.start_month
            )));
        }
    }
    for bound in [transform.min, transform.max].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(rejected(format!("clamp bound {bound} is not finite")));
        }
    }
    if transform.kind == TransformKind::Clamp {
        if transform.min.is_none() && transform.max.is_none() {
            return Err(rejected("clamp transform needs a min or max bound"));
        }
        if let (Some(lo), Some(hi)) = (transform.min, transform.max) {
            if lo >= hi {
                return Err(rejected(format!("clamp min {lo} must be below max {hi}")));
            }
        }
    }
    Ok(())
}

pub fn validate_scenario_spec(spec: &ScenarioSpec) -> Result<(), ScenarioError> {
    if spec.name.trim().is_empty() {
        return Err(rejected("scenario name must not be empty"));
    }
    if spec.metric.trim().is_empty() {
        return Err(rejected("scenario metric must not be empty"));
    }
    if !(MIN_HORIZON_MONTHS..=MAX_HORIZON_MONTHS).contains(&spec.horizon_months) {
        return Err(rejected(format!(
            "horizon_months {} outside [{MIN_HORIZON_MONTHS}, {MAX_HORIZON_MONTHS}]",
            spec.horizon_months
        )));
    }
    if spec.transforms.is_empty() || spec.transforms.len() > MAX_TRANSFORMS {
        return Err(rejected(format!(
            "expected 1 to {MAX_TRANSFORMS} transforms, got {}",
            spec.transforms.len()
        )));
    }
    for transform in &spec.transforms {
        validate_transform(transform)?;
    }
    for bound in [spec.clamp_min, spec.clamp_max].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(rejected(format!("clamp bound {bound} is not finite")));
        }
    }
    if let (Some(lo), Some(hi)) = (spec.clamp_min, spec.clamp_max) {
        if lo >= hi {
            return Err(rejected(format!(
                "clamp_min {lo} must be below clamp_max {hi}"
            )));
        }
    }
    Ok(())
}
