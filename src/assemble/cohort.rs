//! Cohort conversion heat-map assembly.
//!
//! Each cohort row reports leads created in one month plus conversions per
//! elapsed month (`conversions.month_0` .. `month_N`). The view derives the
//! conversion percentage per cell, assigns it a heat bucket, and averages
//! each column across cohorts, skipping cells the backend never reported.

use serde::Serialize;

use crate::aggregate::{percent_of, sum_by};
use crate::buckets::{tables::COHORT_HEAT, BucketThreshold};
use crate::locale::Locale;
use crate::model::normalize_rows;

/// One heat-map cell; `None` at call sites when the backend reported no
/// value for that cohort/column pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortCell {
    pub percent: f64,
    pub bucket: BucketThreshold,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortRow {
    /// Formatted cohort month, e.g. `"Jan/24"`.
    pub label: String,
    pub created: f64,
    pub cells: Vec<Option<CohortCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortView {
    pub rows: Vec<CohortRow>,
    /// Average conversion percentage per column, across the cohorts that
    /// reported that column.
    pub avg_by_column: Vec<f64>,
    pub total_created: f64,
    pub columns: usize,
}

/// Assemble the cohort heat-map from the raw payload.
pub fn assemble_cohort(payload: &serde_json::Value, columns: usize, locale: &Locale) -> CohortView {
    let rows = normalize_rows(Some(payload));
    let total_created = sum_by(&rows, "created");

    let mut column_sums = vec![0.0; columns];
    let mut column_counts = vec![0usize; columns];

    let view_rows: Vec<CohortRow> = rows
        .iter()
        .map(|row| {
            let created = row.metric("created");
            let cells = (0..columns)
                .map(|col| {
                    let conversions = row.metric_opt(&format!("conversions.month_{col}"))?;
                    if created <= 0.0 {
                        return None;
                    }
                    let percent = percent_of(conversions, created);
                    column_sums[col] += percent;
                    column_counts[col] += 1;
                    Some(CohortCell {
                        percent,
                        bucket: COHORT_HEAT.classify(percent).clone(),
                        formatted: locale.percent(percent, 1),
                    })
                })
                .collect();

            CohortRow {
                label: row
                    .tag("cohort")
                    .map(|m| locale.month(m))
                    .unwrap_or_else(|| locale.placeholder.clone()),
                created,
                cells,
            }
        })
        .collect();

    let avg_by_column = column_sums
        .iter()
        .zip(&column_counts)
        .map(|(sum, count)| if *count > 0 { sum / *count as f64 } else { 0.0 })
        .collect();

    CohortView {
        rows: view_rows,
        avg_by_column,
        total_created,
        columns,
    }
}
