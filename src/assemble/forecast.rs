//! Sales forecast assembly: scenario totals, historical win rate, and the
//! weighted-value chart scale.

use serde::Serialize;

use crate::aggregate::{avg_by, max_by, percent_of, sum_by};
use crate::locale::Locale;
use crate::model::section;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPeriod {
    /// Formatted period start, e.g. `"Jan/24"`.
    pub label: String,
    pub pipeline_value: f64,
    pub weighted_value: f64,
    pub best_case: f64,
    pub worst_case: f64,
    pub committed: f64,
    pub deal_count: f64,
    /// Historical win rate on the 0..1 scale, as reported.
    pub win_rate: f64,
    /// Bar height for the weighted-value chart, 0..100.
    pub bar_percent: f64,
    pub formatted_weighted: String,
    pub formatted_win_rate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastTotals {
    pub pipeline: f64,
    pub weighted: f64,
    pub best_case: f64,
    pub worst_case: f64,
    pub committed: f64,
    pub deals: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastView {
    pub periods: Vec<ForecastPeriod>,
    pub totals: ForecastTotals,
    /// Average historical win rate across periods, 0..1 scale; 0 when there
    /// are no periods.
    pub avg_win_rate: f64,
    /// Committed value as a share of the total pipeline, capped at 100.
    pub committed_share: f64,
    pub chart_max: f64,
}

/// Assemble the forecast view from the `{ forecast: [...], historical_won:
/// [...] }` payload. A missing or malformed `forecast` section produces
/// zeroed totals and an `avg_win_rate` of 0, never NaN; `chart_floor` is
/// both the empty-input chart max and its lower bound.
pub fn assemble_forecast(
    payload: &serde_json::Value,
    locale: &Locale,
    chart_floor: f64,
) -> ForecastView {
    let rows = section(payload, "forecast");

    let totals = ForecastTotals {
        pipeline: sum_by(&rows, "pipeline_value"),
        weighted: sum_by(&rows, "weighted_value"),
        best_case: sum_by(&rows, "best_case"),
        worst_case: sum_by(&rows, "worst_case"),
        committed: sum_by(&rows, "committed"),
        deals: sum_by(&rows, "deal_count"),
    };

    let avg_win_rate = avg_by(&rows, "historical_win_rate");
    let chart_max = max_by(&rows, "weighted_value", chart_floor);
    let committed_share = percent_of(totals.committed, totals.pipeline).min(100.0);

    let periods = rows
        .iter()
        .map(|row| {
            let weighted = row.metric("weighted_value");
            let win_rate = row.metric("historical_win_rate");
            ForecastPeriod {
                label: row
                    .tag("period_start")
                    .map(|d| month_label(d, locale))
                    .unwrap_or_else(|| locale.placeholder.clone()),
                pipeline_value: row.metric("pipeline_value"),
                weighted_value: weighted,
                best_case: row.metric("best_case"),
                worst_case: row.metric("worst_case"),
                committed: row.metric("committed"),
                deal_count: row.metric("deal_count"),
                win_rate,
                bar_percent: percent_of(weighted, chart_max).min(100.0),
                formatted_weighted: locale.currency(weighted),
                formatted_win_rate: locale.ratio_percent(win_rate, 1),
            }
        })
        .collect();

    ForecastView {
        periods,
        totals,
        avg_win_rate,
        committed_share,
        chart_max,
    }
}

// Period starts arrive as full dates (`2024-01-01`); the label only wants
// the month.
fn month_label(date: &str, locale: &Locale) -> String {
    let month = date.rsplit_once('-').map(|(ym, _)| ym).unwrap_or(date);
    locale.month(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "forecast": [
                {
                    "period_start": "2024-01-01",
                    "period_end": "2024-01-31",
                    "pipeline_value": 100000.0,
                    "weighted_value": 60000.0,
                    "best_case": 90000.0,
                    "worst_case": 30000.0,
                    "committed": 20000.0,
                    "deal_count": 8,
                    "historical_win_rate": 0.4
                },
                {
                    "period_start": "2024-02-01",
                    "period_end": "2024-02-29",
                    "pipeline_value": 50000.0,
                    "weighted_value": 30000.0,
                    "best_case": 45000.0,
                    "worst_case": 15000.0,
                    "committed": 10000.0,
                    "deal_count": 4,
                    "historical_win_rate": 0.6
                }
            ],
            "historical_won": []
        })
    }

    #[test]
    fn totals_fold_every_scenario_column() {
        let view = assemble_forecast(&payload(), &Locale::default(), 1.0);
        assert_eq!(view.totals.pipeline, 150000.0);
        assert_eq!(view.totals.weighted, 90000.0);
        assert_eq!(view.totals.best_case, 135000.0);
        assert_eq!(view.totals.worst_case, 45000.0);
        assert_eq!(view.totals.committed, 30000.0);
        assert_eq!(view.totals.deals, 12.0);
        assert_eq!(view.avg_win_rate, 0.5);
        assert_eq!(view.committed_share, 20.0);
    }

    #[test]
    fn chart_scales_against_the_largest_weighted_value() {
        let view = assemble_forecast(&payload(), &Locale::default(), 1.0);
        assert_eq!(view.chart_max, 60000.0);
        assert_eq!(view.periods[0].bar_percent, 100.0);
        assert_eq!(view.periods[1].bar_percent, 50.0);
        assert_eq!(view.periods[0].label, "Jan/24");
        assert_eq!(view.periods[0].formatted_win_rate, "40.0%");
    }

    #[test]
    fn missing_forecast_section_yields_zeroed_view() {
        let view = assemble_forecast(&json!({ "historical_won": [] }), &Locale::default(), 1.0);
        assert!(view.periods.is_empty());
        assert_eq!(view.totals, ForecastTotals::default());
        assert_eq!(view.avg_win_rate, 0.0);
        assert_eq!(view.committed_share, 0.0);
        assert_eq!(view.chart_max, 1.0);
    }

    #[test]
    fn configured_chart_floor_carries_into_the_empty_view() {
        let view = assemble_forecast(&json!({}), &Locale::default(), 2.5);
        assert_eq!(view.chart_max, 2.5);
        assert!(view.periods.is_empty());
    }

    #[test]
    fn undefined_forecast_key_never_produces_nan() {
        let view = assemble_forecast(&json!({}), &Locale::default(), 1.0);
        assert!(view.avg_win_rate == 0.0);
        assert!(!view.committed_share.is_nan());
    }
}
