// File: crates/price-chart-core/src/data.rs
// Summary: ChartData input entity (labels, prices, currency) and its validation.

use serde::{Deserialize, Serialize};

use crate::error::InitError;

/// Price history handed to the initializer.
///
/// `labels` and `prices` are expected to line up positionally; that is not checked.
/// `labels` is optional so that a payload missing the field can be represented.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub prices: Vec<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub has_data: bool,
}

impl ChartData {
    pub fn new(labels: Vec<String>, prices: Vec<f64>, currency: impl Into<String>) -> Self {
        let has_data = !prices.is_empty();
        Self { labels: Some(labels), prices, currency: currency.into(), has_data }
    }

    /// Payload with no points, as produced when no history could be extracted.
    pub fn empty(currency: impl Into<String>) -> Self {
        Self { labels: Some(Vec::new()), prices: Vec::new(), currency: currency.into(), has_data: false }
    }

    /// Labels slice, empty when the field is absent.
    pub fn labels(&self) -> &[String] {
        self.labels.as_deref().unwrap_or(&[])
    }

    /// Number of plottable points: the shorter of the two sequences.
    pub fn point_count(&self) -> usize {
        self.labels().len().min(self.prices.len())
    }
}

/// Presence and length check applied before any configuration is built.
/// Only `labels` is inspected; `prices` and `has_data` are taken as given.
pub fn validate(data: Option<&ChartData>) -> Result<&ChartData, InitError> {
    match data {
        Some(d) if d.labels.as_ref().is_some_and(|l| !l.is_empty()) => Ok(d),
        _ => Err(InitError::EmptyOrAbsentData),
    }
}
