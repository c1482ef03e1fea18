//! Row extraction and date alignment for the pattern miner.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::series::{
    discover_value_field, numeric_field, row_date, AlignedSeries, SeriesPoint, SeriesRow,
    SERIES_VALUE_FIELDS,
};

fn row_sector(row: &SeriesRow) -> Option<&str> {
    match row.get("sector") {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Extract observations within [start, end], optionally filtered by
/// sector. Rows without a parseable date or value field are skipped;
/// mining degrades on thin data rather than failing on dirty rows.
pub fn extract_points(
    rows: &[SeriesRow],
    sector: Option<&str>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SeriesPoint> {
    let mut points = Vec::new();
    for row in rows {
        if let Some(wanted) = sector {
            if row_sector(row) != Some(wanted) {
                continue;
            }
        }
        let Some(date) = row_date(row) else { continue };
        if date < start || date > end {
            continue;
        }
        let Some(field) = discover_value_field(row, &SERIES_VALUE_FIELDS) else {
            continue;
        };
        let Some(value) = numeric_field(row, field) else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        let seasonally_adjusted = numeric_field(row, &format!("{field}_sa"))
            .or_else(|| numeric_field(row, "value_sa"))
            .filter(|v| v.is_finite());
        points.push(SeriesPoint {
            date,
            value,
            seasonally_adjusted,
        });
    }
    points.sort_by_key(|p| p.date);
    points
}

/// Inner-join driver and outcome observations on exact date match.
///
/// The seasonally-adjusted arrays collect only dates where both sides
/// carry an adjusted value; [`AlignedSeries::select`] decides whether
/// they are long enough to use.
pub fn align(driver: &[SeriesPoint], outcome: &[SeriesPoint]) -> AlignedSeries {
    let driver_by_date: BTreeMap<NaiveDate, &SeriesPoint> =
        driver.iter().map(|p| (p.date, p)).collect();
    let mut aligned = AlignedSeries::default();
    let mut driver_sa = Vec::new();
    let mut outcome_sa = Vec::new();
    for point in outcome {
        let Some(matched) = driver_by_date.get(&point.date) else {
            continue;
        };
        aligned.dates.push(point.date);
        aligned.driver.push(matched.value);
        aligned.outcome.push(point.value);
        if let (Some(d_sa), Some(o_sa)) = (matched.seasonally_adjusted, point.seasonally_adjusted)
        {
            driver_sa.push(d_sa);
            outcome_sa.push(o_sa);
        }
    }
    if !driver_sa.is_empty() {
        aligned.driver_sa = Some(driver_sa);
        aligned.outcome_sa = Some(outcome_sa);
    }
    aligned
}
