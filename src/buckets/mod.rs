//! Threshold bucket classification.
//!
//! A continuous metric (a percentage, a score, a day count) maps to exactly
//! one discrete presentation bucket (a label plus a style key) through an
//! ordered threshold table. The table is scanned highest-to-lowest and the
//! first threshold whose `min_value <= value` wins, so equal values resolve
//! to the higher bucket. Construction guarantees a terminal catch-all;
//! classification is total over all finite values and negatives land in the
//! catch-all.

use serde::{Deserialize, Serialize};

pub mod tables;

pub use tables::{StyleEntry, StyleMap};

/// One bucket of an ordered threshold table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketThreshold {
    pub min_value: f64,
    pub label: String,
    pub style_key: String,
}

/// Shorthand constructor used by the built-in tables.
pub fn bucket(min_value: f64, label: &str, style_key: &str) -> BucketThreshold {
    BucketThreshold {
        min_value,
        label: label.to_string(),
        style_key: style_key.to_string(),
    }
}

/// A validated, descending-ordered list of thresholds with total coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScale {
    thresholds: Vec<BucketThreshold>,
}

impl BucketScale {
    /// Build a scale from thresholds in any order.
    ///
    /// Thresholds with a NaN `min_value` are discarded, the rest are sorted
    /// descending, and an empty input degrades to a single "other" catch-all
    /// so that `classify` can never come up empty-handed.
    pub fn new(thresholds: Vec<BucketThreshold>) -> Self {
        let mut thresholds: Vec<_> = thresholds
            .into_iter()
            .filter(|t| !t.min_value.is_nan())
            .collect();
        thresholds.sort_by(|a, b| {
            b.min_value
                .partial_cmp(&a.min_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if thresholds.is_empty() {
            thresholds.push(bucket(0.0, "Outro", "muted"));
        }
        Self { thresholds }
    }

    /// Resolve a value to its bucket. Values below every threshold resolve
    /// to the last (catch-all) bucket, which covers negatives.
    pub fn classify(&self, value: f64) -> &BucketThreshold {
        self.thresholds
            .iter()
            .find(|t| t.min_value <= value)
            .unwrap_or_else(|| {
                // Sorted descending and non-empty, so the last entry is the
                // lowest threshold in the table.
                self.thresholds.last().expect("scale is never empty")
            })
    }

    pub fn thresholds(&self) -> &[BucketThreshold] {
        &self.thresholds
    }
}
