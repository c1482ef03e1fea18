//! Scenario spec parsing from YAML, JSON, or native mappings.

use serde_json::Value;

use crate::models::scenario::ScenarioSpec;
use crate::scenario::error::ScenarioError;
use crate::scenario::validation::validate_scenario_spec;

/// Where a scenario spec comes from.
#[derive(Debug, Clone)]
pub enum ScenarioSource<'a> {
    Yaml(&'a str),
    Json(&'a str),
    /// An already-deserialized mapping from an in-process caller.
    Mapping(Value),
}

/// Exchange format for serialized specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeFormat {
    Yaml,
    Json,
}

/// Deserialize and validate a scenario spec.
///
/// Syntax errors and business-rule violations both come back as
/// [`ScenarioError::InvalidSpec`]; callers do not need to distinguish
/// how the spec was malformed.
pub fn parse_scenario(source: ScenarioSource<'_>) -> Result<ScenarioSpec, ScenarioError> {
    let spec: ScenarioSpec = match source {
        ScenarioSource::Yaml(text) => serde_yaml::from_str(text)
            .map_err(|e| ScenarioError::InvalidSpec(format!("yaml: {e}")))?,
        ScenarioSource::Json(text) => serde_json::from_str(text)
            .map_err(|e| ScenarioError::InvalidSpec(format!("json: {e}")))?,
        ScenarioSource::Mapping(value) => serde_json::from_value(value)
            .map_err(|e| ScenarioError::InvalidSpec(format!("mapping: {e}")))?,
    };
    validate_scenario_spec(&spec)?;
    Ok(spec)
}

/// Serialize a spec back to its exchange format.
pub fn serialize_scenario(
    spec: &ScenarioSpec,
    format: ExchangeFormat,
) -> Result<String, ScenarioError> {
    match format {
        ExchangeFormat::Yaml => serde_yaml::to_string(spec)
            .map_err(|e| ScenarioError::InvalidSpec(format!("yaml: {e}"))),
        ExchangeFormat::Json => serde_json::to_string_pretty(spec)
            .map_err(|e| ScenarioError::InvalidSpec(format!("json: {e}"))),
    }
}
