//! Loss analytics assembly: per-reason, per-competitor, per-user, and
//! monthly-trend sections, each with its own bar-chart scale.

use serde::Serialize;

use crate::aggregate::{max_by, percent_of, sum_by};
use crate::locale::Locale;
use crate::model::{section, ReportRow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossBar {
    pub label: String,
    pub count: f64,
    pub total_value: f64,
    /// Bar width against the section maximum, 0..100.
    pub bar_percent: f64,
    /// Share of the section's total count, 0..100.
    pub share_percent: f64,
    pub formatted_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossSection {
    pub bars: Vec<LossBar>,
    pub chart_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossesView {
    pub by_reason: LossSection,
    pub by_competitor: LossSection,
    pub by_user: LossSection,
    pub monthly_trend: LossSection,
    /// Losses and lost value summed over the by-reason section.
    pub total_losses: f64,
    pub total_value: f64,
    pub formatted_total_value: String,
}

/// Assemble loss analytics from the multi-section payload. Sections that
/// are missing or malformed come back empty with a chart max of
/// `chart_floor`.
pub fn assemble_losses(
    payload: &serde_json::Value,
    locale: &Locale,
    chart_floor: f64,
) -> LossesView {
    let by_reason_rows = section(payload, "by_reason");
    let total_losses = sum_by(&by_reason_rows, "count");
    let total_value = sum_by(&by_reason_rows, "total_value");

    LossesView {
        by_reason: assemble_section(&by_reason_rows, "name", locale, chart_floor),
        by_competitor: assemble_section(
            &section(payload, "by_competitor"),
            "competitor_name",
            locale,
            chart_floor,
        ),
        by_user: assemble_section(&section(payload, "by_user"), "name", locale, chart_floor),
        monthly_trend: assemble_trend(&section(payload, "monthly_trend"), locale, chart_floor),
        total_losses,
        total_value,
        formatted_total_value: locale.currency(total_value),
    }
}

fn assemble_section(
    rows: &[ReportRow],
    label_key: &str,
    locale: &Locale,
    chart_floor: f64,
) -> LossSection {
    let chart_max = max_by(rows, "count", chart_floor);
    let total_count = sum_by(rows, "count");
    let bars = rows
        .iter()
        .map(|row| bar(row, row.tag(label_key).unwrap_or("other").to_string(), chart_max, total_count, locale))
        .collect();
    LossSection { bars, chart_max }
}

// The trend section labels bars by month instead of by name.
fn assemble_trend(rows: &[ReportRow], locale: &Locale, chart_floor: f64) -> LossSection {
    let chart_max = max_by(rows, "count", chart_floor);
    let total_count = sum_by(rows, "count");
    let bars = rows
        .iter()
        .map(|row| {
            let label = row
                .tag("month")
                .map(|m| locale.month(m))
                .unwrap_or_else(|| locale.placeholder.clone());
            bar(row, label, chart_max, total_count, locale)
        })
        .collect();
    LossSection { bars, chart_max }
}

fn bar(row: &ReportRow, label: String, chart_max: f64, total_count: f64, locale: &Locale) -> LossBar {
    let count = row.metric("count");
    let total_value = row.metric("total_value");
    LossBar {
        label,
        count,
        total_value,
        bar_percent: percent_of(count, chart_max).min(100.0),
        share_percent: percent_of(count, total_count),
        formatted_value: locale.currency(total_value),
    }
}
