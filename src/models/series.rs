//! Time-series observation models and the host input contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One raw input row as supplied by the host layer. Rows are generic
/// key-value maps; the engine discovers dates and value fields by name.
pub type SeriesRow = HashMap<String, Value>;

/// Candidate value fields for series extraction, tried in order. The
/// order is a compatibility contract with upstream data producers.
pub const SERIES_VALUE_FIELDS: [&str; 5] = [
    "value",
    "rate",
    "salary",
    "retention_rate",
    "qatarization_rate",
];

/// Candidate value fields for baseline forecasts, tried in order.
pub const BASELINE_VALUE_FIELDS: [&str; 3] = ["yhat", "value", "forecast"];

/// A single time-series observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonally_adjusted: Option<f64>,
}

/// Driver and outcome observations paired by exact date match, with
/// parallel raw arrays and optional parallel seasonally-adjusted arrays.
#[derive(Debug, Clone, Default)]
pub struct AlignedSeries {
    pub dates: Vec<NaiveDate>,
    pub driver: Vec<f64>,
    pub outcome: Vec<f64>,
    pub driver_sa: Option<Vec<f64>>,
    pub outcome_sa: Option<Vec<f64>>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Pick the seasonally-adjusted arrays when both are present, of equal
    /// length, and long enough to satisfy `min_support`; otherwise fall
    /// back to the raw arrays. Returns (driver, outcome, used_sa).
    pub fn select(&self, min_support: usize) -> (&[f64], &[f64], bool) {
        if let (Some(driver_sa), Some(outcome_sa)) = (&self.driver_sa, &self.outcome_sa) {
            if driver_sa.len() == outcome_sa.len() && driver_sa.len() >= min_support {
                return (driver_sa, outcome_sa, true);
            }
        }
        (&self.driver, &self.outcome, false)
    }
}

/// Parse a date field, accepting full ISO dates and `YYYY-MM` months.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
}

/// Read a numeric field from a row, tolerating JSON numbers and numeric
/// strings.
pub fn numeric_field(row: &SeriesRow, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

/// Find the first candidate field present in the row.
pub fn discover_value_field<'a>(row: &SeriesRow, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|&c| row.contains_key(c))
}

/// Read the row's date from the `date` or `month` field.
pub fn row_date(row: &SeriesRow) -> Option<NaiveDate> {
    for key in ["date", "month"] {
        if let Some(Value::String(raw)) = row.get(key) {
            if let Some(date) = parse_date(raw) {
                return Some(date);
            }
        }
    }
    None
}
