//! Pure transform kernels over a baseline value array.

/// Resolve an inclusive [start, end] range against the series length.
/// Returns None when the range starts past the end of the series.
fn resolve_range(len: usize, start: usize, end: Option<usize>) -> Option<(usize, usize)> {
    if len == 0 || start >= len {
        return None;
    }
    let end = end.map_or(len - 1, |e| e.min(len - 1));
    Some((start, end))
}

/// Shift every value in the range by a fixed amount.
pub fn apply_additive(values: &mut [f64], shift: f64, start: usize, end: Option<usize>) {
    if let Some((s, e)) = resolve_range(values.len(), start, end) {
        for value in &mut values[s..=e] {
            *value += shift;
        }
    }
}

/// Scale every value in the range by (1 + rate).
pub fn apply_multiplicative(values: &mut [f64], rate: f64, start: usize, end: Option<usize>) {
    if let Some((s, e)) = resolve_range(values.len(), start, end) {
        for value in &mut values[s..=e] {
            *value *= 1.0 + rate;
        }
    }
}

/// Replace the range with a fixed-rate compounding trajectory seeded
/// from the value immediately before the range, or from the first
/// in-range value when the range starts the series. Unlike the additive
/// and multiplicative kernels, the original shape inside the range is
/// discarded.
pub fn apply_growth_override(values: &mut [f64], rate: f64, start: usize, end: Option<usize>) {
    if let Some((s, e)) = resolve_range(values.len(), start, end) {
        let mut level = if s == 0 { values[0] } else { values[s - 1] };
        for value in &mut values[s..=e] {
            level *= 1.0 + rate;
            *value = level;
        }
    }
}

/// Bound every value in the series elementwise.
pub fn apply_clamp(values: &mut [f64], min: Option<f64>, max: Option<f64>) {
    for value in values.iter_mut() {
        if let Some(lo) = min {
            if *value < lo {
                *value = lo;
            }
        }
        if let Some(hi) = max {
            if *value > hi {
                *value = hi;
            }
        }
    }
}
