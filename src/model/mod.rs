//! Report payload data model and the degrade-to-empty normalization boundary.
//!
//! Backend analytics endpoints return JSON payloads whose exact shape drifts:
//! sometimes a bare array of rows, sometimes one or two `{ "data": ... }`
//! envelopes around it, sometimes with keys missing entirely. Everything
//! downstream of this module assumes rows have already been normalized, so
//! all defensive coalescing lives here and nowhere else. Normalization never
//! fails; a payload that cannot be understood produces an empty row set.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One unit of server-aggregated report data: a cohort-month, a pipeline
/// stage, a competitor, a loss reason.
///
/// Numeric fields land in `metrics`, string fields in `tags`. Nested objects
/// of numerics (e.g. cohort `conversions`) are flattened one level with
/// dotted keys (`conversions.month_0`). Metrics are non-negative except
/// difference fields and NPS scores, which stay signed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub metrics: BTreeMap<String, f64>,
    pub tags: BTreeMap<String, String>,
}

impl ReportRow {
    /// Read a numeric metric; missing keys read as 0.
    pub fn metric(&self, key: &str) -> f64 {
        self.metrics.get(key).copied().unwrap_or(0.0)
    }

    /// Read a numeric metric that may legitimately be absent.
    pub fn metric_opt(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    /// Read a categorical tag.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Build a row from a JSON object, tolerating any field shape.
    ///
    /// Non-object input yields an empty row. Arrays and deeper nesting are
    /// ignored; they carry drill-down detail the report layer never reads.
    pub fn from_value(value: &Value) -> Self {
        let mut row = ReportRow::default();
        let Some(obj) = value.as_object() else {
            return row;
        };

        for (key, field) in obj {
            match field {
                Value::Number(n) => {
                    if let Some(v) = n.as_f64() {
                        row.insert_metric(key.clone(), v);
                    }
                }
                Value::String(s) => {
                    // Backends serialize some decimal columns as strings.
                    if let Ok(v) = s.parse::<f64>() {
                        row.insert_metric(key.clone(), v);
                    } else {
                        row.tags.insert(key.clone(), s.clone());
                    }
                }
                Value::Object(nested) => {
                    for (nested_key, nested_field) in nested {
                        if let Some(v) = nested_field.as_f64() {
                            row.insert_metric(format!("{key}.{nested_key}"), v);
                        }
                    }
                }
                _ => {}
            }
        }

        row
    }

    fn insert_metric(&mut self, key: String, value: f64) {
        if !value.is_finite() {
            return;
        }
        // Only difference fields and NPS scores may be signed; anything
        // else negative is backend noise and clamps to zero.
        let value = if value < 0.0 && !is_signed_key(&key) {
            0.0
        } else {
            value
        };
        self.metrics.insert(key, value);
    }
}

fn is_signed_key(key: &str) -> bool {
    key.contains("diff") || key == "score" || key.ends_with(".score")
}

/// Strip the `{ "data": ... }` envelope the API gateway sometimes applies,
/// up to two levels deep (`res.data.data` in the original client).
pub fn unwrap_envelope(value: &Value) -> &Value {
    let mut current = value;
    for _ in 0..2 {
        match current.get("data") {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// Normalize an optional payload fragment into rows, degrading to empty.
pub fn normalize_rows(value: Option<&Value>) -> Vec<ReportRow> {
    let Some(value) = value else {
        return Vec::new();
    };
    let value = unwrap_envelope(value);

    match value.as_array() {
        Some(items) => items
            .iter()
            .filter(|item| item.is_object())
            .map(ReportRow::from_value)
            .collect(),
        None => {
            if !value.is_null() {
                warn!("expected an array of report rows, got {}", kind_of(value));
            }
            Vec::new()
        }
    }
}

/// Normalize a named section of a multi-section payload
/// (e.g. `by_reason` inside the loss-analytics response).
pub fn section(payload: &Value, key: &str) -> Vec<ReportRow> {
    normalize_rows(unwrap_envelope(payload).get(key))
}

/// Normalize a payload that is a single metrics object rather than an array
/// (e.g. the pipeline-velocity summary).
pub fn single_row(payload: &Value) -> ReportRow {
    let value = unwrap_envelope(payload);
    if !value.is_object() {
        if !value.is_null() {
            warn!("expected a report object, got {}", kind_of(value));
        }
        return ReportRow::default();
    }
    ReportRow::from_value(value)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_flattens_nested_numeric_objects() {
        let row = ReportRow::from_value(&json!({
            "cohort": "2024-01",
            "created": 100,
            "conversions": { "month_0": 50, "month_1": 30 }
        }));

        assert_eq!(row.metric("created"), 100.0);
        assert_eq!(row.metric("conversions.month_0"), 50.0);
        assert_eq!(row.metric("conversions.month_1"), 30.0);
        assert_eq!(row.tag("cohort"), Some("2024-01"));
    }

    #[test]
    fn missing_metric_reads_as_zero() {
        let row = ReportRow::from_value(&json!({ "name": "Preço" }));
        assert_eq!(row.metric("count"), 0.0);
        assert_eq!(row.metric_opt("count"), None);
    }

    #[test]
    fn numeric_strings_parse_as_metrics() {
        let row = ReportRow::from_value(&json!({ "total_value": "1234.5" }));
        assert_eq!(row.metric("total_value"), 1234.5);
    }

    #[test]
    fn negative_metrics_clamp_except_signed_fields() {
        let row = ReportRow::from_value(&json!({
            "count": -3,
            "price_diff_pct": -12.5,
            "score": -40.0
        }));
        assert_eq!(row.metric("count"), 0.0);
        assert_eq!(row.metric("price_diff_pct"), -12.5);
        assert_eq!(row.metric("score"), -40.0);
    }

    #[test]
    fn non_object_input_yields_empty_row() {
        assert_eq!(ReportRow::from_value(&json!(42)), ReportRow::default());
        assert_eq!(ReportRow::from_value(&json!(null)), ReportRow::default());
    }

    #[test]
    fn normalize_unwraps_single_and_double_envelopes() {
        let bare = json!([{ "count": 1 }]);
        let once = json!({ "data": [{ "count": 1 }] });
        let twice = json!({ "data": { "data": [{ "count": 1 }] } });

        for payload in [&bare, &once, &twice] {
            let rows = normalize_rows(Some(payload));
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].metric("count"), 1.0);
        }
    }

    #[test]
    fn normalize_degrades_to_empty_on_malformed_payloads() {
        assert!(normalize_rows(None).is_empty());
        assert!(normalize_rows(Some(&json!(null))).is_empty());
        assert!(normalize_rows(Some(&json!("oops"))).is_empty());
        assert!(normalize_rows(Some(&json!({ "data": 7 }))).is_empty());
    }

    #[test]
    fn normalize_skips_non_object_elements() {
        let rows = normalize_rows(Some(&json!([{ "count": 2 }, 5, "x", null])));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn section_reads_named_fragment() {
        let payload = json!({ "by_reason": [{ "name": "Preço", "count": 4 }] });
        let rows = section(&payload, "by_reason");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag("name"), Some("Preço"));

        assert!(section(&payload, "by_competitor").is_empty());
    }

    #[test]
    fn single_row_handles_envelope_and_garbage() {
        let payload = json!({ "data": { "avg_cycle_days": 12.5 } });
        assert_eq!(single_row(&payload).metric("avg_cycle_days"), 12.5);
        assert_eq!(single_row(&json!([1, 2])), ReportRow::default());
    }
}
