//! NPS dashboard assembly: score category plus promoter/passive/detractor
//! distribution.

use serde::Serialize;

use crate::aggregate::percent_of;
use crate::buckets::{tables::NPS_SCORE, BucketThreshold};
use crate::locale::Locale;
use crate::model::{normalize_rows, single_row, unwrap_envelope};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpsMonth {
    pub label: String,
    pub score: f64,
    pub category: BucketThreshold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpsView {
    /// Net promoter score, -100..100.
    pub score: f64,
    pub category: BucketThreshold,
    pub total_responses: f64,
    pub promoters: f64,
    pub passives: f64,
    pub detractors: f64,
    /// Distribution shares over answered responses, 0..100 each.
    pub promoter_share: f64,
    pub passive_share: f64,
    pub detractor_share: f64,
    pub by_month: Vec<NpsMonth>,
}

/// Assemble the NPS view from the stats payload.
pub fn assemble_nps(payload: &serde_json::Value, locale: &Locale) -> NpsView {
    let stats = single_row(payload);

    let promoters = stats.metric("promoters");
    let passives = stats.metric("passives");
    let detractors = stats.metric("detractors");
    let answered = promoters + passives + detractors;

    let score = stats.metric("score");

    let by_month = normalize_rows(unwrap_envelope(payload).get("by_month"))
        .iter()
        .map(|row| {
            let month_score = row.metric("score");
            NpsMonth {
                label: row
                    .tag("month")
                    .map(|m| locale.month(m))
                    .unwrap_or_else(|| locale.placeholder.clone()),
                score: month_score,
                category: NPS_SCORE.classify(month_score).clone(),
            }
        })
        .collect();

    NpsView {
        score,
        category: NPS_SCORE.classify(score).clone(),
        total_responses: stats.metric("total_responses"),
        promoters,
        passives,
        detractors,
        promoter_share: percent_of(promoters, answered),
        passive_share: percent_of(passives, answered),
        detractor_share: percent_of(detractors, answered),
        by_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn score_category_and_shares() {
        let payload = json!({
            "score": 55.0,
            "total_responses": 20,
            "promoters": 14,
            "passives": 4,
            "detractors": 2,
            "by_month": [
                { "month": "2024-01", "score": 10.0 },
                { "month": "2024-02", "score": -20.0 }
            ]
        });
        let view = assemble_nps(&payload, &Locale::default());

        assert_eq!(view.category.label, "Excelente");
        assert_eq!(view.promoter_share, 70.0);
        assert_eq!(view.passive_share, 20.0);
        assert_eq!(view.detractor_share, 10.0);
        assert_eq!(view.by_month[0].category.label, "Bom");
        assert_eq!(view.by_month[1].category.label, "Ruim");
        assert_eq!(view.by_month[1].score, -20.0);
    }

    #[test]
    fn negative_scores_survive_normalization() {
        let view = assemble_nps(&json!({ "score": -35.5 }), &Locale::default());
        assert_eq!(view.score, -35.5);
        assert_eq!(view.category.label, "Ruim");
    }

    #[test]
    fn empty_payload_degrades_to_zero_shares() {
        let view = assemble_nps(&json!({}), &Locale::default());
        assert_eq!(view.score, 0.0);
        assert_eq!(view.category.label, "Bom");
        assert_eq!(view.promoter_share, 0.0);
        assert!(view.by_month.is_empty());
    }
}
