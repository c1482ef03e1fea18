//! Finding classification and deterministic ordering.

use std::cmp::Ordering;

use crate::models::pattern::{Direction, PatternFinding};

/// Classify an effect against the flat threshold. Effects too small to
/// matter are flat; the sign decides the rest.
pub fn classify_direction(effect: f64, flat_threshold: f64) -> Direction {
    if effect.abs() < flat_threshold {
        Direction::Flat
    } else if effect > 0.0 {
        Direction::Positive
    } else {
        Direction::Negative
    }
}

/// Order findings by support, stability, and |effect|, all descending,
/// with the driver name as a final ascending tie-break. The name
/// tie-break keeps the ordering fully deterministic for identical
/// floating-point inputs.
pub fn compare_findings(a: &PatternFinding, b: &PatternFinding) -> Ordering {
    b.support
        .total_cmp(&a.support)
        .then_with(|| b.stability.total_cmp(&a.stability))
        .then_with(|| b.effect.abs().total_cmp(&a.effect.abs()))
        .then_with(|| a.driver.cmp(&b.driver))
}

pub fn rank_findings(findings: &mut [PatternFinding]) {
    findings.sort_by(compare_findings);
}
