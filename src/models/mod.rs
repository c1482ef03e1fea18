//! Shared data models spanning the engine layers.

pub mod derived;
pub mod pattern;
pub mod scenario;
pub mod series;

pub use derived::{DerivedResult, Provenance};
pub use pattern::{CorrelationMethod, Direction, PatternFinding, PatternSpec};
pub use scenario::{AggregationMethod, ScenarioSpec, Transform, TransformKind};
pub use series::{AlignedSeries, SeriesPoint, SeriesRow};
