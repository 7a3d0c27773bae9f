//! Turning weight tables into ranked percentage lists

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::aggregate::weights::WeightTable;

/// A category key and its share of the whole, in [0, 1]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentEntry {
    pub key: String,
    pub fraction: f64,
}

impl PercentEntry {
    pub fn new(key: impl Into<String>, fraction: f64) -> Self {
        Self {
            key: key.into(),
            fraction,
        }
    }

    /// Share on a 0-100 scale
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Normalize a table so its fractions sum to 1.0, largest first.
///
/// Equal fractions keep the table's insertion order. A table with no
/// positive weight yields an empty list.
pub fn normalize(table: &WeightTable) -> Vec<PercentEntry> {
    let positive = || table.iter().filter(|(_, w)| *w > 0.0);
    let max = positive().map(|(_, w)| w).fold(0.0, f64::max);
    if !(max > 0.0) || !max.is_finite() {
        return Vec::new();
    }
    // Rescale when the raw total overflows
    let raw: f64 = positive().map(|(_, w)| w).sum();
    let scale = if raw.is_finite() { 1.0 } else { max };
    let sum: f64 = positive().map(|(_, w)| w / scale).sum();

    let mut entries: Vec<PercentEntry> = positive()
        .map(|(key, w)| PercentEntry::new(key, (w / scale) / sum))
        .collect();
    // sort_by_key is stable
    entries.sort_by_key(|e| Reverse(OrderedFloat(e.fraction)));
    entries
}
