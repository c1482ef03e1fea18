//! Rolling-window pattern discovery over labour-market series.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::config::MinerConfig;
use crate::metrics;
use crate::models::derived::{DerivedResult, IdHasher};
use crate::models::pattern::{
    CorrelationMethod, Direction, PatternFinding, PatternSpec, ALLOWED_WINDOWS,
};
use crate::models::series::SeriesRow;
use crate::patterns::extract::{align, extract_points};
use crate::patterns::ranking::{classify_direction, rank_findings};

/// Days per month used for window arithmetic. A deliberate fixed
/// approximation rather than calendar months: downstream consumers
/// depend on the resulting window edges staying put.
const DAYS_PER_MONTH: i64 = 30;

/// Named series feeding a mining call.
pub type SeriesMap = HashMap<String, Vec<SeriesRow>>;

/// Discovers statistically stable driver-outcome relationships.
///
/// Stateless apart from its configuration, which is fixed at
/// construction; one instance can serve any number of callers.
pub struct PatternMiner {
    config: MinerConfig,
}

impl PatternMiner {
    pub fn new() -> Self {
        Self {
            config: MinerConfig::default(),
        }
    }

    pub fn with_config(config: MinerConfig) -> Self {
        Self { config }
    }

    /// Mine driver-outcome relationships over the spec's lookback window
    /// ending at `end_date`.
    ///
    /// Thin data never fails the call: a missing or short outcome series
    /// yields an empty result, missing drivers become warnings, and
    /// drivers with too few aligned observations are skipped. Flat
    /// relationships are dropped before ranking.
    pub fn mine_stable_relations(
        &self,
        spec: &PatternSpec,
        end_date: NaiveDate,
        series_map: &SeriesMap,
    ) -> DerivedResult<PatternFinding> {
        let window_start = end_date - Duration::days(spec.window as i64 * DAYS_PER_MONTH);
        let mut sources = vec![spec.outcome.clone()];
        sources.extend(spec.drivers.iter().cloned());
        let mut warnings = Vec::new();

        let Some(outcome_rows) = series_map.get(&spec.outcome) else {
            warnings.push(format!("outcome series '{}' not found", spec.outcome));
            return Self::finalize(Self::relations_hasher(spec), sources, end_date, Vec::new(), warnings);
        };
        let outcome_points =
            extract_points(outcome_rows, spec.sector.as_deref(), window_start, end_date);
        if outcome_points.len() < spec.min_support {
            debug!(
                outcome = %spec.outcome,
                n = outcome_points.len(),
                min_support = spec.min_support,
                "not enough outcome observations in window"
            );
            return Self::finalize(Self::relations_hasher(spec), sources, end_date, Vec::new(), warnings);
        }

        let cohort = spec.sector.clone().unwrap_or_else(|| "all".to_string());
        let mut findings = Vec::new();
        for driver_name in &spec.drivers {
            let Some(driver_rows) = series_map.get(driver_name) else {
                warnings.push(format!("driver series '{driver_name}' not found"));
                continue;
            };
            let driver_points =
                extract_points(driver_rows, spec.sector.as_deref(), window_start, end_date);
            let aligned = align(&driver_points, &outcome_points);
            if aligned.len() < spec.min_support {
                continue;
            }
            let (driver_values, outcome_values, used_sa) = aligned.select(spec.min_support);
            let effect = match spec.method {
                CorrelationMethod::Pearson => metrics::pearson(driver_values, outcome_values),
                CorrelationMethod::Spearman => metrics::spearman(driver_values, outcome_values),
            }
            .clamp(-1.0, 1.0);
            let direction = classify_direction(effect, self.config.flat_threshold);
            if direction == Direction::Flat {
                continue;
            }
            findings.push(PatternFinding {
                driver: driver_name.clone(),
                effect,
                support: metrics::support(driver_values.len(), spec.min_support),
                stability: metrics::stability(driver_values),
                direction,
                cohort: cohort.clone(),
                n: driver_values.len(),
                seasonally_adjusted: used_sa,
            });
        }

        rank_findings(&mut findings);
        Self::finalize(Self::relations_hasher(spec), sources, end_date, findings, warnings)
    }

    /// Mine calendar-month seasonal effects from one series.
    ///
    /// Observations up to `end_date` are grouped by calendar month,
    /// preferring each point's seasonally-adjusted value when present.
    /// Each month's effect is the lift of its mean against the grand
    /// mean; months with fewer than max(3, min_support / 12)
    /// observations are skipped.
    pub fn mine_seasonal_effects(
        &self,
        series_name: &str,
        rows: &[SeriesRow],
        end_date: NaiveDate,
        min_support: usize,
        sector: Option<&str>,
    ) -> DerivedResult<PatternFinding> {
        let sources = vec![series_name.to_string()];
        let warnings = Vec::new();
        let mut hasher = IdHasher::new("seasonal");
        hasher.write_str(series_name);
        hasher.write_usize(min_support);
        hasher.write_str(sector.unwrap_or(""));
        let points = extract_points(rows, sector, NaiveDate::MIN, end_date);
        if points.is_empty() {
            return Self::finalize(hasher, sources, end_date, Vec::new(), warnings);
        }

        let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        let mut sa_complete: BTreeMap<u32, bool> = BTreeMap::new();
        for point in &points {
            let month = point.date.month();
            by_month
                .entry(month)
                .or_default()
                .push(point.seasonally_adjusted.unwrap_or(point.value));
            let complete = sa_complete.entry(month).or_insert(true);
            *complete &= point.seasonally_adjusted.is_some();
        }
        let all_values: Vec<f64> = by_month.values().flatten().copied().collect();
        let per_month_required = (min_support / 12).max(3);

        let mut findings = Vec::new();
        for (month, values) in &by_month {
            if values.len() < per_month_required {
                continue;
            }
            let effect = metrics::lift(values, &all_values);
            let direction = classify_direction(effect, self.config.flat_threshold);
            if direction == Direction::Flat {
                continue;
            }
            findings.push(PatternFinding {
                driver: series_name.to_string(),
                effect,
                support: metrics::support(values.len(), per_month_required),
                stability: metrics::stability(values),
                direction,
                cohort: format!("month_{month:02}"),
                n: values.len(),
                seasonally_adjusted: sa_complete.get(month).copied().unwrap_or(false),
            });
        }

        rank_findings(&mut findings);
        Self::finalize(hasher, sources, end_date, findings, warnings)
    }

    /// Screen one driver-outcome pair across every (cohort, window)
    /// combination, each producing an independent Spearman finding
    /// labeled `"{cohort}_w{window}"`.
    ///
    /// The most expensive entry point, bounded by the configured cohort
    /// cap and the fixed window whitelist. Truncation is surfaced as a
    /// warning on the result.
    pub fn screen_driver_across_cohorts(
        &self,
        driver: &str,
        outcome: &str,
        cohorts: &[String],
        windows: &[u32],
        end_date: NaiveDate,
        series_map: &SeriesMap,
        min_support: usize,
    ) -> DerivedResult<PatternFinding> {
        let sources = vec![outcome.to_string(), driver.to_string()];
        let mut warnings = Vec::new();
        let mut hasher = IdHasher::new("screen");
        hasher.write_str(driver);
        hasher.write_str(outcome);
        hasher.write_usize(min_support);
        for cohort in cohorts {
            hasher.write_str(cohort);
        }
        for &window in windows {
            hasher.write_usize(window as usize);
        }

        let screened = if cohorts.len() > self.config.max_cohorts {
            warn!(
                requested = cohorts.len(),
                cap = self.config.max_cohorts,
                "cohort screen truncated"
            );
            warnings.push(format!(
                "cohort screen truncated to first {} of {} cohorts",
                self.config.max_cohorts,
                cohorts.len()
            ));
            &cohorts[..self.config.max_cohorts]
        } else {
            cohorts
        };

        let mut findings = Vec::new();
        for cohort in screened {
            for &window in windows {
                if !ALLOWED_WINDOWS.contains(&window) {
                    push_unique(
                        &mut warnings,
                        format!("window {window} skipped: unsupported lookback"),
                    );
                    continue;
                }
                let spec = PatternSpec {
                    outcome: outcome.to_string(),
                    drivers: vec![driver.to_string()],
                    sector: Some(cohort.clone()),
                    window,
                    min_support,
                    method: CorrelationMethod::Spearman,
                };
                let sub = self.mine_stable_relations(&spec, end_date, series_map);
                for mut finding in sub.rows {
                    finding.cohort = format!("{cohort}_w{window}");
                    findings.push(finding);
                }
                for warning in sub.warnings {
                    push_unique(&mut warnings, warning);
                }
            }
        }

        rank_findings(&mut findings);
        Self::finalize(hasher, sources, end_date, findings, warnings)
    }

    fn relations_hasher(spec: &PatternSpec) -> IdHasher {
        let mut hasher = IdHasher::new("relations");
        hasher.write_str(&spec.outcome);
        for driver in &spec.drivers {
            hasher.write_str(driver);
        }
        hasher.write_str(spec.sector.as_deref().unwrap_or(""));
        hasher.write_usize(spec.window as usize);
        hasher.write_usize(spec.min_support);
        hasher.write_usize(spec.method as usize);
        hasher
    }

    fn finalize(
        mut hasher: IdHasher,
        sources: Vec<String>,
        end_date: NaiveDate,
        rows: Vec<PatternFinding>,
        warnings: Vec<String>,
    ) -> DerivedResult<PatternFinding> {
        hasher.write_str(&end_date.to_string());
        for finding in &rows {
            hasher.write_str(&finding.driver);
            hasher.write_str(&finding.cohort);
            hasher.write_f64(finding.effect);
            hasher.write_f64(finding.support);
            hasher.write_f64(finding.stability);
            hasher.write_usize(finding.n);
        }
        DerivedResult::new(hasher.finish(), rows, "score", sources)
            .with_freshness(end_date.to_string())
            .with_warnings(warnings)
    }
}

impl Default for PatternMiner {
    fn default() -> Self {
        Self::new()
    }
}

fn push_unique(warnings: &mut Vec<String>, warning: String) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}
