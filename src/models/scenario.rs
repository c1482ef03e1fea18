//! Scenario DSL value objects.
//!
//! `Transform` and `ScenarioSpec` are validated once at construction and
//! immutable afterwards. Deserialized specs must go through
//! [`crate::scenario::parser::parse_scenario`], which re-runs the same
//! validation before handing the spec to the interpreter.

use serde::{Deserialize, Serialize};

use crate::scenario::error::ScenarioError;
use crate::scenario::validation::{validate_scenario_spec, validate_transform};

/// Atomic forecast adjustment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Additive,
    Multiplicative,
    GrowthOverride,
    Clamp,
}

/// One composable forecast adjustment.
///
/// `value` is the shift for additive transforms, the rate for
/// multiplicative and growth-override transforms, and unused for clamp
/// transforms, which carry their bounds in `min`/`max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(rename = "type")]
    pub kind: TransformKind,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub start_month: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Transform {
    /// Build a validated ranged transform.
    pub fn new(
        kind: TransformKind,
        value: f64,
        start_month: usize,
        end_month: Option<usize>,
    ) -> Result<Self, ScenarioError> {
        let transform = Self {
            kind,
            value,
            start_month,
            end_month,
            min: None,
            max: None,
        };
        validate_transform(&transform)?;
        Ok(transform)
    }

    /// Build a validated clamp transform bounding the whole series.
    pub fn clamp(min: Option<f64>, max: Option<f64>) -> Result<Self, ScenarioError> {
        let transform = Self {
            kind: TransformKind::Clamp,
            value: 0.0,
            start_month: 0,
            end_month: None,
            min,
            max,
        };
        validate_transform(&transform)?;
        Ok(transform)
    }
}

/// How sector outputs combine in the national roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    WeightedMean,
    Mean,
    Sum,
}

impl Default for AggregationMethod {
    fn default() -> Self {
        Self::WeightedMean
    }
}

/// A named what-if adjustment over a baseline forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub horizon_months: u32,
    pub transforms: Vec<Transform>,
    #[serde(default)]
    pub aggregation: AggregationMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamp_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clamp_max: Option<f64>,
}

impl ScenarioSpec {
    /// Build a validated scenario spec with the required fields.
    pub fn new(
        name: impl Into<String>,
        metric: impl Into<String>,
        horizon_months: u32,
        transforms: Vec<Transform>,
    ) -> Result<Self, ScenarioError> {
        let spec = Self {
            name: name.into(),
            description: String::new(),
            metric: metric.into(),
            sector: None,
            horizon_months,
            transforms,
            aggregation: AggregationMethod::default(),
            clamp_min: None,
            clamp_max: None,
        };
        validate_scenario_spec(&spec)?;
        Ok(spec)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_aggregation(mut self, aggregation: AggregationMethod) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Attach a spec-level clamp applied after every transform.
    pub fn with_clamp(
        mut self,
        clamp_min: Option<f64>,
        clamp_max: Option<f64>,
    ) -> Result<Self, ScenarioError> {
        self.clamp_min = clamp_min;
        self.clamp_max = clamp_max;
        validate_scenario_spec(&self)?;
        Ok(self)
    }
}
