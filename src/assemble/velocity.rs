//! Pipeline velocity assembly: cycle metrics plus per-stage funnel bars.

use serde::Serialize;

use crate::aggregate::{max_by, percent_of};
use crate::locale::Locale;
use crate::model::{normalize_rows, single_row, unwrap_envelope};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageView {
    pub name: String,
    pub deals_count: f64,
    pub total_value: f64,
    pub avg_days_in_stage: f64,
    /// Funnel bar width against the largest stage value, 0..100.
    pub bar_percent: f64,
    pub formatted_value: String,
    pub formatted_days: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VelocityView {
    pub avg_cycle_days: f64,
    pub avg_deal_value: f64,
    /// Potential revenue per day over the selected window.
    pub velocity_number: f64,
    /// Win rate on the 0..100 scale, as reported.
    pub win_rate: f64,
    pub total_deals: f64,
    pub stages: Vec<StageView>,
    pub stage_max: f64,
    pub formatted_cycle: String,
    pub formatted_deal_value: String,
    pub formatted_velocity: String,
    pub formatted_win_rate: String,
}

/// Assemble the velocity view. The payload is a single metrics object with
/// a nested `stages` array; both tolerate the data envelope and degrade to
/// zeros/empty when missing.
pub fn assemble_velocity(
    payload: &serde_json::Value,
    locale: &Locale,
    chart_floor: f64,
) -> VelocityView {
    let summary = single_row(payload);
    let stage_rows = normalize_rows(unwrap_envelope(payload).get("stages"));

    let stage_max = max_by(&stage_rows, "total_value", chart_floor);
    let stages = stage_rows
        .iter()
        .map(|row| {
            let total_value = row.metric("total_value");
            StageView {
                name: row.tag("name").unwrap_or("other").to_string(),
                deals_count: row.metric("deals_count"),
                total_value,
                avg_days_in_stage: row.metric("avg_days_in_stage"),
                bar_percent: percent_of(total_value, stage_max).min(100.0),
                formatted_value: locale.currency(total_value),
                formatted_days: locale.days(row.metric("avg_days_in_stage")),
            }
        })
        .collect();

    let avg_cycle_days = summary.metric("avg_cycle_days");
    let avg_deal_value = summary.metric("avg_deal_value");
    let velocity_number = summary.metric("velocity_number");
    let win_rate = summary.metric("win_rate");

    VelocityView {
        avg_cycle_days,
        avg_deal_value,
        velocity_number,
        win_rate,
        total_deals: summary.metric("total_deals"),
        stages,
        stage_max,
        formatted_cycle: locale.days(avg_cycle_days),
        formatted_deal_value: locale.currency(avg_deal_value),
        formatted_velocity: locale.currency(velocity_number),
        formatted_win_rate: locale.percent(win_rate, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn stage_bars_scale_against_the_largest_stage() {
        let payload = json!({
            "data": {
                "avg_cycle_days": 18.4,
                "avg_deal_value": 12000.0,
                "velocity_number": 2500.0,
                "win_rate": 32.5,
                "total_deals": 40,
                "stages": [
                    { "name": "Proposta", "deals_count": 10, "total_value": 80000.0, "avg_days_in_stage": 6.2 },
                    { "name": "Negociação", "deals_count": 5, "total_value": 40000.0, "avg_days_in_stage": 9.1 }
                ]
            }
        });
        let view = assemble_velocity(&payload, &Locale::default(), 1.0);

        assert_eq!(view.stage_max, 80000.0);
        assert_eq!(view.stages[0].bar_percent, 100.0);
        assert_eq!(view.stages[1].bar_percent, 50.0);
        assert_eq!(view.stages[0].formatted_value, "R$ 80.000,00");
        assert_eq!(view.formatted_cycle, "18,4 dias");
        assert_eq!(view.formatted_win_rate, "32.5%");
    }

    #[test]
    fn missing_payload_degrades_to_zeroed_summary() {
        let view = assemble_velocity(&json!(null), &Locale::default(), 1.0);
        assert_eq!(view.avg_cycle_days, 0.0);
        assert_eq!(view.total_deals, 0.0);
        assert!(view.stages.is_empty());
        assert_eq!(view.stage_max, 1.0);
    }

    #[test]
    fn stage_max_starts_at_the_configured_floor() {
        let view = assemble_velocity(&json!(null), &Locale::default(), 3.0);
        assert_eq!(view.stage_max, 3.0);
    }
}
