//! Pure aggregation reducers over normalized report rows.
//!
//! These folds never mutate their input and define explicit empty-input
//! values: sums and averages yield 0, maxima yield the caller's floor so
//! that percent-of-max chart scaling downstream never divides by zero.
//! All arithmetic is plain IEEE f64; rounding for display happens only in
//! the locale formatters.

use std::collections::BTreeMap;

use crate::model::ReportRow;

/// Sum a metric across rows; empty input yields 0.
pub fn sum_by(rows: &[ReportRow], key: &str) -> f64 {
    rows.iter().map(|row| row.metric(key)).sum()
}

/// Average a metric across rows; empty input yields 0, never NaN.
pub fn avg_by(rows: &[ReportRow], key: &str) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    sum_by(rows, key) / rows.len() as f64
}

/// Maximum of a metric across rows, floored. The floor is both the
/// empty-input value and a lower bound on the result, matching the
/// `Math.max(...values, 1)` chart-scale guard in the source dashboards.
pub fn max_by(rows: &[ReportRow], key: &str, floor: f64) -> f64 {
    rows.iter()
        .map(|row| row.metric(key))
        .fold(floor, f64::max)
}

/// Sum one metric grouped by a categorical tag. Rows missing the tag are
/// grouped under `"other"`.
pub fn group_sum_by(rows: &[ReportRow], group_key: &str, sum_key: &str) -> BTreeMap<String, f64> {
    let mut groups = BTreeMap::new();
    for row in rows {
        let group = row.tag(group_key).unwrap_or("other").to_string();
        *groups.entry(group).or_insert(0.0) += row.metric(sum_key);
    }
    groups
}

/// The one canonical zero-guard: a ratio is 0 when the denominator is not
/// strictly positive. Every percentage in the crate goes through here.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// `ratio` on the 0..100 percent scale.
pub fn percent_of(num: f64, den: f64) -> f64 {
    ratio(num, den) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: &[(&str, f64)]) -> Vec<ReportRow> {
        values
            .iter()
            .map(|(name, count)| {
                ReportRow::from_value(&json!({ "name": name, "count": count }))
            })
            .collect()
    }

    #[test]
    fn sum_and_avg_fold_over_rows() {
        let rows = rows(&[("a", 10.0), ("b", 30.0)]);
        assert_eq!(sum_by(&rows, "count"), 40.0);
        assert_eq!(avg_by(&rows, "count"), 20.0);
        assert_eq!(sum_by(&rows, "missing"), 0.0);
    }

    #[test]
    fn empty_input_yields_defined_defaults() {
        assert_eq!(sum_by(&[], "count"), 0.0);
        assert_eq!(avg_by(&[], "count"), 0.0);
        assert_eq!(max_by(&[], "weighted_value", 1.0), 1.0);
        assert!(group_sum_by(&[], "name", "count").is_empty());
    }

    #[test]
    fn max_by_respects_the_floor() {
        let below = rows(&[("a", 0.5), ("b", 0.2)]);
        assert_eq!(max_by(&below, "count", 1.0), 1.0);

        let above = rows(&[("a", 5.0)]);
        assert_eq!(max_by(&above, "count", 1.0), 5.0);
    }

    #[test]
    fn group_sum_accumulates_per_tag() {
        let mut input = rows(&[("pricing", 2.0), ("pricing", 3.0), ("timing", 1.0)]);
        input.push(ReportRow::from_value(&json!({ "count": 7 })));

        let groups = group_sum_by(&input, "name", "count");
        assert_eq!(groups.get("pricing"), Some(&5.0));
        assert_eq!(groups.get("timing"), Some(&1.0));
        assert_eq!(groups.get("other"), Some(&7.0));
    }

    #[test]
    fn reducers_do_not_mutate_input() {
        let input = rows(&[("a", 10.0)]);
        let before = input.clone();
        let _ = sum_by(&input, "count");
        let _ = max_by(&input, "count", 1.0);
        let _ = group_sum_by(&input, "name", "count");
        assert_eq!(input, before);
    }

    #[test]
    fn canonical_zero_guard() {
        assert_eq!(ratio(10.0, 0.0), 0.0);
        assert_eq!(ratio(10.0, -5.0), 0.0);
        assert_eq!(ratio(10.0, 4.0), 2.5);
        assert_eq!(percent_of(50.0, 100.0), 50.0);
        assert_eq!(percent_of(1.0, 0.0), 0.0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_rows() -> impl Strategy<Value = Vec<ReportRow>> {
        prop::collection::vec(0.0..1e6f64, 0..20).prop_map(|counts| {
            counts
                .into_iter()
                .map(|count| ReportRow::from_value(&json!({ "count": count })))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn sums_of_non_negative_metrics_are_non_negative(rows in arb_rows()) {
            prop_assert!(sum_by(&rows, "count") >= 0.0);
            prop_assert!(avg_by(&rows, "count") >= 0.0);
        }

        #[test]
        fn max_never_drops_below_the_floor(rows in arb_rows(), floor in 0.1..10.0f64) {
            prop_assert!(max_by(&rows, "count", floor) >= floor);
        }

        #[test]
        fn group_sums_conserve_the_total(rows in arb_rows()) {
            let grouped: f64 = group_sum_by(&rows, "name", "count").values().sum();
            let total = sum_by(&rows, "count");
            prop_assert!((grouped - total).abs() <= 1e-6 * total.max(1.0));
        }
    }
}
