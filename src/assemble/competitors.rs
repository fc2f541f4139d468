//! Competitor win/loss assembly.

use serde::Serialize;

use crate::aggregate::{percent_of, sum_by};
use crate::buckets::{tables::WIN_RATE, BucketThreshold};
use crate::locale::Locale;
use crate::model::normalize_rows;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorRow {
    pub name: String,
    pub encounters: f64,
    pub wins: f64,
    pub losses: f64,
    /// Win rate on the 0..100 scale; taken from the payload when present,
    /// otherwise derived from wins/encounters.
    pub win_rate: f64,
    pub bucket: BucketThreshold,
    pub formatted_win_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorView {
    pub rows: Vec<CompetitorRow>,
    pub total_encounters: f64,
    pub total_wins: f64,
    pub total_losses: f64,
    /// Overall win rate derived from the summed counts, 0..100.
    pub overall_win_rate: f64,
    pub overall_bucket: BucketThreshold,
}

/// Assemble the competitor comparison from an array-of-competitors payload.
pub fn assemble_competitors(payload: &serde_json::Value, locale: &Locale) -> CompetitorView {
    let rows = normalize_rows(Some(payload));

    let total_encounters = sum_by(&rows, "total_encounters");
    let total_wins = sum_by(&rows, "wins");
    let total_losses = sum_by(&rows, "losses");
    let overall_win_rate = percent_of(total_wins, total_encounters);

    let mut view_rows: Vec<CompetitorRow> = rows
        .iter()
        .map(|row| {
            let wins = row.metric("wins");
            let encounters = row.metric("total_encounters");
            let win_rate = row
                .metric_opt("win_rate")
                .unwrap_or_else(|| percent_of(wins, encounters));
            CompetitorRow {
                name: row.tag("name").unwrap_or("other").to_string(),
                encounters,
                wins,
                losses: row.metric("losses"),
                win_rate,
                bucket: WIN_RATE.classify(win_rate).clone(),
                formatted_win_rate: locale.percent(win_rate, 1),
            }
        })
        .collect();

    // Strongest competitors first, the order the ranking card shows them.
    view_rows.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    CompetitorView {
        rows: view_rows,
        total_encounters,
        total_wins,
        total_losses,
        overall_win_rate,
        overall_bucket: WIN_RATE.classify(overall_win_rate).clone(),
    }
}
