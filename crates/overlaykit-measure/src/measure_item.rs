//! A single labelled measurement value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement reported to the display layer
///
/// `value` is `None` when the quantity cannot be computed for the current
/// shape (for example the centroid of a zero-area region).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureItem {
    pub label: String,
    pub value: Option<f64>,
    pub unit: String,
}

impl MeasureItem {
    pub fn new(label: impl Into<String>, value: Option<f64>, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for MeasureItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}: {:.3} {}", self.label, v, self.unit),
            None => write!(f, "{}: n/a", self.label),
        }
    }
}
