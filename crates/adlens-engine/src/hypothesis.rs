//! Rule-based hypotheses and trend annotations from a [`WindowSummary`].
//!
//! Rules are evaluated in display-priority order and are not mutually
//! exclusive. When none fires, exactly one fallback hypothesis is emitted.

use crate::types::{Hypothesis, HypothesisKind, Metric, MetricInsight, Trend, WindowSummary};

/// CTR relative change below which CTR counts as significantly dropped.
pub const CTR_DROP: f64 = -0.05;
/// CTR relative change above which CTR counts as significantly increased.
pub const CTR_RISE: f64 = 0.05;
/// ROAS relative change below which ROAS counts as significantly dropped.
pub const ROAS_DROP: f64 = -0.10;
/// ROAS relative change above which ROAS counts as significantly increased.
pub const ROAS_RISE: f64 = 0.10;

const SATURATION_CTR_DROP: f64 = -0.03;
const SATURATION_ROAS_DROP: f64 = -0.05;

/// Generate the ordered hypothesis list for one campaign.
#[must_use]
pub fn generate_hypotheses(summary: &WindowSummary) -> Vec<Hypothesis> {
    let ctr = summary.ctr_change_pct;
    let roas = summary.roas_change_pct;
    let mut hypotheses = Vec::new();

    if ctr < CTR_DROP {
        hypotheses.push(Hypothesis {
            kind: HypothesisKind::CreativeFatigue,
            text: "Creative fatigue leading to lower CTR".to_string(),
            confidence: 0.80,
            evidence: format!("CTR changed by {ctr:.2} versus the previous window."),
        });
    }

    if roas < ROAS_DROP {
        hypotheses.push(Hypothesis {
            kind: HypothesisKind::SpendInefficiency,
            text: "Increased spend without proportional returns".to_string(),
            confidence: 0.75,
            evidence: format!("ROAS changed by {roas:.2} versus the previous window."),
        });
    }

    if ctr < SATURATION_CTR_DROP && roas < SATURATION_ROAS_DROP {
        hypotheses.push(Hypothesis {
            kind: HypothesisKind::AudienceSaturation,
            text: "Audience saturation or targeting inefficiency".to_string(),
            confidence: 0.70,
            evidence: format!("CTR ({ctr:.2}) and ROAS ({roas:.2}) decreased together."),
        });
    }

    if hypotheses.is_empty() {
        hypotheses.push(Hypothesis {
            kind: HypothesisKind::NoMajorIssues,
            text: "No major performance issues detected".to_string(),
            confidence: 0.50,
            evidence: format!("CTR ({ctr:.2}) and ROAS ({roas:.2}) changes are minimal."),
        });
    }

    hypotheses
}

/// The two always-present trend annotations: CTR first, then ROAS.
#[must_use]
pub fn metric_insights(summary: &WindowSummary) -> Vec<MetricInsight> {
    vec![
        insight(
            Metric::Ctr,
            summary.recent_ctr,
            summary.previous_ctr,
            summary.ctr_change_pct,
            CTR_DROP,
            CTR_RISE,
        ),
        insight(
            Metric::Roas,
            summary.recent_roas,
            summary.previous_roas,
            summary.roas_change_pct,
            ROAS_DROP,
            ROAS_RISE,
        ),
    ]
}

/// Classify a relative change against symmetric drop/rise thresholds.
#[must_use]
pub fn classify_trend(change: f64, drop: f64, rise: f64) -> Trend {
    if change < drop {
        Trend::SignificantlyDropped
    } else if change > rise {
        Trend::SignificantlyIncreased
    } else {
        Trend::Stable
    }
}

fn insight(
    metric: Metric,
    recent: f64,
    previous: f64,
    change_pct: f64,
    drop: f64,
    rise: f64,
) -> MetricInsight {
    let trend = classify_trend(change_pct, drop, rise);
    let interpretation = match trend {
        Trend::SignificantlyDropped => format!("{metric} has significantly dropped."),
        Trend::SignificantlyIncreased => format!("{metric} has significantly increased."),
        Trend::Stable => format!("{metric} has remained relatively stable."),
    };

    MetricInsight {
        metric,
        recent,
        previous,
        change_pct,
        trend,
        interpretation,
    }
}
