//! Report view assembly.
//!
//! The assembler is the only orchestration in the crate: it runs the
//! normalization boundary, the aggregation reducers, the bucket classifier,
//! and the locale formatters over one payload and hands back a fresh
//! view-model. It is a single-shot, stateless transform (the same payload
//! always produces a deep-equal view-model) and it inherits the
//! degrade-to-empty contract of the model layer: a malformed payload yields
//! empty rows and zeroed totals, never a panic or error.
//!
//! Typed per-report assemblers live in the submodules; the generic
//! [`assemble`] path covers the common "array of rows" reports.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::{avg_by, max_by, sum_by};
use crate::buckets::{BucketScale, BucketThreshold};
use crate::locale::Locale;
use crate::model::{normalize_rows, section, ReportRow};

pub mod cohort;
pub mod competitors;
pub mod forecast;
pub mod losses;
pub mod nps;
pub mod velocity;

/// Summed/averaged metrics across a row set. Averages are keyed `avg_<key>`.
pub type AggregateTotals = BTreeMap<String, f64>;

/// How a metric renders in the `formatted` map of an assembled row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricKind {
    /// Locale currency, 2 decimals.
    Currency,
    /// Already on the 0..100 scale, 1 decimal.
    Percent,
    /// On the 0..1 scale, rendered as percent, 1 decimal.
    RatioPercent,
    /// Grouped integer.
    Count,
    /// Day quantity, 1 decimal.
    Days,
    /// ISO date tag.
    Date,
    /// ISO month tag (`YYYY-MM`).
    Month,
}

/// Declarative description of one array-of-rows report.
#[derive(Debug, Clone)]
pub struct ReportSpec {
    /// Key of the row array inside the payload; `None` when the payload
    /// itself is the array.
    pub rows_key: Option<String>,
    /// Metrics (or tags, for date kinds) to pre-format per row.
    pub formats: Vec<(String, MetricKind)>,
    /// Metrics to sum into the totals.
    pub sum_keys: Vec<String>,
    /// Metrics to average into the totals, keyed `avg_<key>`.
    pub avg_keys: Vec<String>,
    /// Metric driving bucket classification.
    pub bucket_metric: String,
    pub scale: BucketScale,
    /// Metric driving the chart-scale maximum.
    pub chart_key: String,
    /// Empty-input and lower-bound value for `chart_max`.
    pub chart_floor: f64,
}

/// One source row plus its derived presentation data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledRow {
    pub row: ReportRow,
    pub bucket: BucketThreshold,
    pub formatted: BTreeMap<String, String>,
}

/// The render-ready product of one assembly pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub rows: Vec<AssembledRow>,
    pub totals: AggregateTotals,
    pub chart_max: f64,
}

/// Assemble a generic array-of-rows report payload.
pub fn assemble(payload: &serde_json::Value, spec: &ReportSpec, locale: &Locale) -> ViewModel {
    let rows = match &spec.rows_key {
        Some(key) => section(payload, key),
        None => normalize_rows(Some(payload)),
    };

    let mut totals = AggregateTotals::new();
    for key in &spec.sum_keys {
        totals.insert(key.clone(), sum_by(&rows, key));
    }
    for key in &spec.avg_keys {
        totals.insert(format!("avg_{key}"), avg_by(&rows, key));
    }

    let chart_max = max_by(&rows, &spec.chart_key, spec.chart_floor);

    let rows = rows
        .into_iter()
        .map(|row| {
            let bucket = spec.scale.classify(row.metric(&spec.bucket_metric)).clone();
            let formatted = spec
                .formats
                .iter()
                .map(|(key, kind)| (key.clone(), format_metric(&row, key, *kind, locale)))
                .collect();
            AssembledRow {
                row,
                bucket,
                formatted,
            }
        })
        .collect();

    ViewModel {
        rows,
        totals,
        chart_max,
    }
}

/// Format one row field according to its metric kind.
pub fn format_metric(row: &ReportRow, key: &str, kind: MetricKind, locale: &Locale) -> String {
    match kind {
        MetricKind::Currency => locale.currency(row.metric(key)),
        MetricKind::Percent => locale.percent(row.metric(key), 1),
        MetricKind::RatioPercent => locale.ratio_percent(row.metric(key), 1),
        MetricKind::Count => locale.count(row.metric(key)),
        MetricKind::Days => locale.days(row.metric(key)),
        MetricKind::Date => locale.date(row.tag(key)),
        MetricKind::Month => match row.tag(key) {
            Some(m) => locale.month(m),
            None => locale.placeholder.clone(),
        },
    }
}
