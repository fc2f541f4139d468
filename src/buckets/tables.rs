//! Central bucket tables and categorical style maps.
//!
//! Every threshold and label the dashboards used to scatter across pages
//! (`getCellColor`, `getProgressColor`, win-rate badges, grade and priority
//! configs) lives here as one immutable set keyed by domain concept.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use super::{bucket, BucketScale};

/// Green intensity scale for the cohort conversion heat-map.
pub static COHORT_HEAT: Lazy<BucketScale> = Lazy::new(|| {
    BucketScale::new(vec![
        bucket(50.0, "≥50%", "green-600"),
        bucket(30.0, "≥30%", "green-500"),
        bucket(20.0, "≥20%", "green-400"),
        bucket(10.0, "≥10%", "green-300"),
        bucket(5.0, "≥5%", "green-200"),
        // Strictly-positive band: zero belongs to the catch-all.
        bucket(f64::MIN_POSITIVE, ">0%", "green-100"),
        bucket(0.0, "0%", "muted"),
    ])
});

/// Competitive win-rate tiers.
pub static WIN_RATE: Lazy<BucketScale> = Lazy::new(|| {
    BucketScale::new(vec![
        bucket(60.0, "Forte", "success"),
        bucket(40.0, "Média", "warning"),
        bucket(0.0, "Fraca", "danger"),
    ])
});

/// Goal completion progress.
pub static GOAL_PROGRESS: Lazy<BucketScale> = Lazy::new(|| {
    BucketScale::new(vec![
        bucket(100.0, "Atingida", "success"),
        bucket(75.0, "No ritmo", "info"),
        bucket(50.0, "Atenção", "warning"),
        bucket(0.0, "Crítica", "danger"),
    ])
});

/// NPS score category; the score ranges -100..100.
pub static NPS_SCORE: Lazy<BucketScale> = Lazy::new(|| {
    BucketScale::new(vec![
        bucket(50.0, "Excelente", "success"),
        bucket(0.0, "Bom", "warning"),
        bucket(-100.0, "Ruim", "danger"),
    ])
});

/// Individual NPS response classification (0..10 answer).
pub static NPS_RESPONSE: Lazy<BucketScale> = Lazy::new(|| {
    BucketScale::new(vec![
        bucket(9.0, "Promotor", "success"),
        bucket(7.0, "Neutro", "warning"),
        bucket(0.0, "Detrator", "danger"),
    ])
});

/// Label + style pair for categorical lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleEntry {
    pub label: &'static str,
    pub style_key: &'static str,
}

/// Categorical map with a guaranteed fallback, so unknown backend values
/// always resolve to something renderable.
#[derive(Debug, Clone)]
pub struct StyleMap {
    entries: BTreeMap<&'static str, StyleEntry>,
    fallback: StyleEntry,
}

impl StyleMap {
    fn new(entries: &[(&'static str, StyleEntry)], fallback: StyleEntry) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
            fallback,
        }
    }

    pub fn get(&self, key: &str) -> &StyleEntry {
        self.entries.get(key).unwrap_or(&self.fallback)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&&'static str, &StyleEntry)> {
        self.entries.iter()
    }
}

/// Lead temperature grades; unknown grades render like D, as the original
/// scoring page did.
pub static LEAD_GRADE: Lazy<StyleMap> = Lazy::new(|| {
    let ice = StyleEntry {
        label: "Ice",
        style_key: "muted",
    };
    StyleMap::new(
        &[
            (
                "A",
                StyleEntry {
                    label: "Hot",
                    style_key: "danger",
                },
            ),
            (
                "B",
                StyleEntry {
                    label: "Warm",
                    style_key: "warning",
                },
            ),
            (
                "C",
                StyleEntry {
                    label: "Cold",
                    style_key: "info",
                },
            ),
            ("D", ice),
        ],
        ice,
    )
});

/// Smart-alert priorities; unknown priorities render as low.
pub static ALERT_PRIORITY: Lazy<StyleMap> = Lazy::new(|| {
    let low = StyleEntry {
        label: "Baixo",
        style_key: "muted",
    };
    StyleMap::new(
        &[
            (
                "critical",
                StyleEntry {
                    label: "Crítico",
                    style_key: "danger",
                },
            ),
            (
                "high",
                StyleEntry {
                    label: "Alto",
                    style_key: "warning",
                },
            ),
            (
                "medium",
                StyleEntry {
                    label: "Médio",
                    style_key: "info",
                },
            ),
            ("low", low),
        ],
        low,
    )
});

/// Account-plan statuses.
pub static PLAN_STATUS: Lazy<StyleMap> = Lazy::new(|| {
    StyleMap::new(
        &[
            (
                "active",
                StyleEntry {
                    label: "Ativo",
                    style_key: "success",
                },
            ),
            (
                "completed",
                StyleEntry {
                    label: "Concluído",
                    style_key: "info",
                },
            ),
            (
                "paused",
                StyleEntry {
                    label: "Pausado",
                    style_key: "warning",
                },
            ),
            (
                "cancelled",
                StyleEntry {
                    label: "Cancelado",
                    style_key: "muted",
                },
            ),
        ],
        StyleEntry {
            label: "Outro",
            style_key: "muted",
        },
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cohort_heat_bands() {
        assert_eq!(COHORT_HEAT.classify(50.0).style_key, "green-600");
        assert_eq!(COHORT_HEAT.classify(49.9).style_key, "green-500");
        assert_eq!(COHORT_HEAT.classify(7.0).style_key, "green-200");
        assert_eq!(COHORT_HEAT.classify(0.1).style_key, "green-100");
        assert_eq!(COHORT_HEAT.classify(0.0).style_key, "muted");
    }

    #[test]
    fn win_rate_tiers_match_badge_semantics() {
        assert_eq!(WIN_RATE.classify(60.0).style_key, "success");
        assert_eq!(WIN_RATE.classify(40.0).style_key, "warning");
        assert_eq!(WIN_RATE.classify(39.999).style_key, "danger");
    }

    #[test]
    fn nps_score_covers_negative_scores() {
        assert_eq!(NPS_SCORE.classify(72.0).label, "Excelente");
        assert_eq!(NPS_SCORE.classify(0.0).label, "Bom");
        assert_eq!(NPS_SCORE.classify(-40.0).label, "Ruim");
    }

    #[test]
    fn categorical_maps_fall_back() {
        assert_eq!(LEAD_GRADE.get("A").label, "Hot");
        assert_eq!(LEAD_GRADE.get("Z").label, "Ice");
        assert_eq!(ALERT_PRIORITY.get("critical").label, "Crítico");
        assert_eq!(ALERT_PRIORITY.get("whatever").label, "Baixo");
        assert_eq!(PLAN_STATUS.get("active").style_key, "success");
        assert_eq!(PLAN_STATUS.get("archived").label, "Outro");
    }
}
