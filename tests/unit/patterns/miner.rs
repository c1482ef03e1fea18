//! Unit tests for the pattern miner

use laborlens::config::MinerConfig;
use laborlens::models::pattern::{CorrelationMethod, Direction, PatternSpec};
use laborlens::models::series::SeriesRow;
use laborlens::patterns::{PatternMiner, SeriesMap};
use chrono::NaiveDate;
use serde_json::json;

fn row(date: &str, value: f64) -> SeriesRow {
    let mut map = SeriesRow::new();
    map.insert("date".to_string(), json!(date));
    map.insert("value".to_string(), json!(value));
    map
}

fn sector_row(date: &str, value: f64, sector: &str) -> SeriesRow {
    let mut map = row(date, value);
    map.insert("sector".to_string(), json!(sector));
    map
}

fn sa_row(date: &str, value: f64, sa: f64) -> SeriesRow {
    let mut map = row(date, value);
    map.insert("value_sa".to_string(), json!(sa));
    map
}

fn monthly_2024(values: &[f64]) -> Vec<SeriesRow> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| row(&format!("2024-{:02}-01", i + 1), v))
        .collect()
}

fn end_of_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
}

fn spec(drivers: &[&str]) -> PatternSpec {
    PatternSpec::new(
        "employment",
        drivers.iter().map(|d| d.to_string()).collect(),
        None,
        12,
        6,
        CorrelationMethod::Spearman,
    )
    .unwrap()
}

fn basic_map() -> SeriesMap {
    let outcome: Vec<f64> = (0..12).map(|i| 100.0 + i as f64).collect();
    let rising: Vec<f64> = (0..12).map(|i| 10.0 + 2.0 * i as f64).collect();
    let falling: Vec<f64> = (0..12).map(|i| 50.0 - i as f64).collect();
    let flat = vec![7.0; 12];
    let mut map = SeriesMap::new();
    map.insert("employment".to_string(), monthly_2024(&outcome));
    map.insert("visas".to_string(), monthly_2024(&rising));
    map.insert("attrition".to_string(), monthly_2024(&falling));
    map.insert("holidays".to_string(), monthly_2024(&flat));
    map
}

#[test]
fn test_mine_never_returns_flat() {
    let miner = PatternMiner::new();
    let result = miner.mine_stable_relations(
        &spec(&["visas", "attrition", "holidays"]),
        end_of_2024(),
        &basic_map(),
    );
    assert_eq!(result.rows.len(), 2);
    assert!(result.rows.iter().all(|f| f.direction != Direction::Flat));
    assert!(result.rows.iter().all(|f| f.driver != "holidays"));
}

#[test]
fn test_mine_effect_signs_and_bounds() {
    let miner = PatternMiner::new();
    let result = miner.mine_stable_relations(
        &spec(&["visas", "attrition"]),
        end_of_2024(),
        &basic_map(),
    );
    for finding in &result.rows {
        assert!((-1.0..=1.0).contains(&finding.effect));
        match finding.driver.as_str() {
            "visas" => assert_eq!(finding.direction, Direction::Positive),
            "attrition" => assert_eq!(finding.direction, Direction::Negative),
            other => panic!("unexpected driver {other}"),
        }
    }
}

#[test]
fn test_mine_repeated_calls_identical() {
    let miner = PatternMiner::new();
    let query = spec(&["visas", "attrition"]);
    let map = basic_map();
    let first = miner.mine_stable_relations(&query, end_of_2024(), &map);
    let second = miner.mine_stable_relations(&query, end_of_2024(), &map);
    assert_eq!(first.id, second.id);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_mine_ranking_tie_breaks_by_driver_name() {
    // Two drivers identical except for their names rank alphabetically.
    let outcome: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let mut map = SeriesMap::new();
    map.insert("employment".to_string(), monthly_2024(&outcome));
    map.insert("beta".to_string(), monthly_2024(&outcome));
    map.insert("alpha".to_string(), monthly_2024(&outcome));
    let miner = PatternMiner::new();
    let result = miner.mine_stable_relations(&spec(&["beta", "alpha"]), end_of_2024(), &map);
    let drivers: Vec<&str> = result.rows.iter().map(|f| f.driver.as_str()).collect();
    assert_eq!(drivers, vec!["alpha", "beta"]);
}

#[test]
fn test_mine_missing_driver_becomes_warning() {
    let miner = PatternMiner::new();
    let result =
        miner.mine_stable_relations(&spec(&["visas", "ghost"]), end_of_2024(), &basic_map());
    assert_eq!(result.rows.len(), 1);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("ghost") && w.contains("not found")));
}

#[test]
fn test_mine_insufficient_outcome_is_empty() {
    let outcome = vec![100.0, 101.0, 102.0];
    let mut map = SeriesMap::new();
    map.insert("employment".to_string(), monthly_2024(&outcome));
    map.insert("visas".to_string(), monthly_2024(&outcome));
    let miner = PatternMiner::new();
    let result = miner.mine_stable_relations(&spec(&["visas"]), end_of_2024(), &map);
    assert!(result.rows.is_empty());
}

#[test]
fn test_mine_sector_filter() {
    let mut outcome_rows = Vec::new();
    let mut driver_rows = Vec::new();
    for i in 0..12 {
        let date = format!("2024-{:02}-01", i + 1);
        outcome_rows.push(sector_row(&date, 100.0 + i as f64, "energy"));
        // Same dates in another sector move the other way.
        outcome_rows.push(sector_row(&date, 100.0 - i as f64, "retail"));
        driver_rows.push(sector_row(&date, 10.0 + i as f64, "energy"));
        driver_rows.push(sector_row(&date, 10.0 + i as f64, "retail"));
    }
    let mut map = SeriesMap::new();
    map.insert("employment".to_string(), outcome_rows);
    map.insert("visas".to_string(), driver_rows);

    let query = PatternSpec::new(
        "employment",
        vec!["visas".to_string()],
        Some("energy".to_string()),
        12,
        6,
        CorrelationMethod::Spearman,
    )
    .unwrap();
    let miner = PatternMiner::new();
    let result = miner.mine_stable_relations(&query, end_of_2024(), &map);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].cohort, "energy");
    assert_eq!(result.rows[0].direction, Direction::Positive);
}

#[test]
fn test_mine_prefers_seasonally_adjusted_arrays() {
    let mut outcome_rows = Vec::new();
    let mut driver_rows = Vec::new();
    for i in 0..12 {
        let date = format!("2024-{:02}-01", i + 1);
        outcome_rows.push(sa_row(&date, 100.0, 100.0 + i as f64));
        driver_rows.push(sa_row(&date, 5.0, 10.0 + i as f64));
    }
    let mut map = SeriesMap::new();
    map.insert("employment".to_string(), outcome_rows);
    map.insert("visas".to_string(), driver_rows);
    let miner = PatternMiner::new();
    let result = miner.mine_stable_relations(&spec(&["visas"]), end_of_2024(), &map);
    // Raw arrays are constant; only the adjusted arrays carry the trend.
    assert_eq!(result.rows.len(), 1);
    assert!(result.rows[0].seasonally_adjusted);
    assert_eq!(result.rows[0].direction, Direction::Positive);
}

#[test]
fn test_seasonal_effects_surface_spike_month() {
    let mut rows = Vec::new();
    for year in 2021..=2024 {
        for month in 1..=12 {
            let value = if month == 7 { 150.0 } else { 100.0 };
            rows.push(row(&format!("{year}-{month:02}-01"), value));
        }
    }
    let miner = PatternMiner::new();
    let result = miner.mine_seasonal_effects("arrivals", &rows, end_of_2024(), 12, None);
    assert!(!result.rows.is_empty());
    assert!(result.rows.iter().all(|f| f.direction != Direction::Flat));
    let top = &result.rows[0];
    assert_eq!(top.cohort, "month_07");
    assert_eq!(top.direction, Direction::Positive);
    assert!(top.effect > 40.0);
}

#[test]
fn test_seasonal_effects_skip_thin_months() {
    // Only two Januaries: below the per-month floor of three.
    let rows = vec![
        row("2023-01-01", 100.0),
        row("2024-01-01", 200.0),
        row("2024-02-01", 100.0),
        row("2024-03-01", 100.0),
        row("2024-04-01", 100.0),
    ];
    let miner = PatternMiner::new();
    let result = miner.mine_seasonal_effects("arrivals", &rows, end_of_2024(), 12, None);
    assert!(result.rows.iter().all(|f| f.cohort != "month_01"));
}

#[test]
fn test_screen_labels_and_window_whitelist() {
    let mut outcome_rows = Vec::new();
    let mut driver_rows = Vec::new();
    for sector in ["construction", "energy"] {
        for i in 0..24 {
            let date = format!("20{}-{:02}-01", 23 + i / 12, (i % 12) + 1);
            outcome_rows.push(sector_row(&date, 100.0 + i as f64, sector));
            driver_rows.push(sector_row(&date, 10.0 + i as f64, sector));
        }
    }
    let mut map = SeriesMap::new();
    map.insert("employment".to_string(), outcome_rows);
    map.insert("visas".to_string(), driver_rows);

    let miner = PatternMiner::new();
    let cohorts = vec!["construction".to_string(), "energy".to_string()];
    let result = miner.screen_driver_across_cohorts(
        "visas",
        "employment",
        &cohorts,
        &[6, 9, 12],
        end_of_2024(),
        &map,
        5,
    );
    assert!(!result.rows.is_empty());
    for finding in &result.rows {
        assert!(
            finding.cohort.ends_with("_w6") || finding.cohort.ends_with("_w12"),
            "unexpected cohort label {}",
            finding.cohort
        );
    }
    assert!(result.warnings.iter().any(|w| w.contains("window 9")));
}

#[test]
fn test_screen_cohort_cap_warns() {
    let config = MinerConfig {
        max_cohorts: 2,
        ..MinerConfig::default()
    };
    let miner = PatternMiner::with_config(config);
    let cohorts: Vec<String> = (0..5).map(|i| format!("sector_{i}")).collect();
    let result = miner.screen_driver_across_cohorts(
        "visas",
        "employment",
        &cohorts,
        &[6],
        end_of_2024(),
        &SeriesMap::new(),
        5,
    );
    assert!(result.rows.is_empty());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.contains("truncated to first 2 of 5")));
}
