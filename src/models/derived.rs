//! Provenance-carrying wrapper around every engine output.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Source identifiers a result was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub sources: Vec<String>,
}

/// The engine's sole output artifact. Downstream narrative layers cite
/// results by `id`, which is a pure function of the operation, its
/// parameters, and the row content: identical inputs always produce the
/// identical id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedResult<T> {
    pub id: String,
    pub rows: Vec<T>,
    pub unit: String,
    pub provenance: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

impl<T> DerivedResult<T> {
    pub fn new(id: String, rows: Vec<T>, unit: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            id,
            rows,
            unit: unit.into(),
            provenance: Provenance { sources },
            freshness: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_freshness(mut self, freshness: impl Into<String>) -> Self {
        self.freshness = Some(freshness.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Incremental hasher behind derived-result ids.
///
/// Floats are hashed by bit pattern and options carry an explicit
/// presence tag, so the digest is a stable function of the written
/// fields.
pub struct IdHasher {
    operation: String,
    inner: DefaultHasher,
}

impl IdHasher {
    pub fn new(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        let mut inner = DefaultHasher::new();
        operation.hash(&mut inner);
        Self { operation, inner }
    }

    pub fn write_str(&mut self, value: &str) {
        value.hash(&mut self.inner);
    }

    pub fn write_f64(&mut self, value: f64) {
        value.to_bits().hash(&mut self.inner);
    }

    pub fn write_usize(&mut self, value: usize) {
        value.hash(&mut self.inner);
    }

    pub fn write_opt_f64(&mut self, value: Option<f64>) {
        match value {
            Some(v) => {
                1u8.hash(&mut self.inner);
                v.to_bits().hash(&mut self.inner);
            }
            None => 0u8.hash(&mut self.inner),
        }
    }

    pub fn write_opt_usize(&mut self, value: Option<usize>) {
        match value {
            Some(v) => {
                1u8.hash(&mut self.inner);
                v.hash(&mut self.inner);
            }
            None => 0u8.hash(&mut self.inner),
        }
    }

    /// Produce the final `derived_<operation>_<hash>` identifier.
    pub fn finish(self) -> String {
        format!("derived_{}_{:016x}", self.operation, self.inner.finish())
    }
}
