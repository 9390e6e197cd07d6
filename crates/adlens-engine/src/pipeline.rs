//! Per-campaign analysis pipeline.

use adlens_core::{AnalysisConfig, CampaignRecords};

use crate::creative::recommend;
use crate::evaluate::evaluate_or_degrade;
use crate::hypothesis::{generate_hypotheses, metric_insights};
use crate::metrics::{campaign_totals, daily_metrics};
use crate::observer::{AnalysisEvent, AnalysisObserver};
use crate::stats::assess_significance;
use crate::types::{CampaignAnalysis, CampaignOutcome, RunAnalysis, SkipReason};
use crate::window::compare_windows;

/// Run the full analysis for one campaign.
///
/// 1. Skip campaigns with fewer than `min_rows_per_campaign` raw rows.
/// 2. Aggregate records into daily metrics.
/// 3. Compare the last two windows; skip if history is too short.
/// 4. Annotate trends and generate hypotheses.
/// 5. Score per-metric significance and evaluate impact with the configured
///    strategy, degrading to the fallback result on failure.
/// 6. Recommend creatives when the trigger condition holds.
///
/// Reads nothing but its arguments; campaigns can be analyzed in parallel.
pub fn analyze_campaign(
    campaign: &CampaignRecords,
    config: &AnalysisConfig,
    observer: &dyn AnalysisObserver,
) -> CampaignOutcome {
    let name = campaign.campaign_name.as_str();
    let rows = campaign.row_count();
    observer.on_event(&AnalysisEvent::CampaignStarted {
        campaign: name,
        rows,
    });

    if rows < config.min_rows_per_campaign {
        return skip(
            name,
            SkipReason::TooFewRows {
                rows,
                required: config.min_rows_per_campaign,
            },
            observer,
        );
    }

    let days = daily_metrics(campaign);
    observer.on_event(&AnalysisEvent::MetricsComputed {
        campaign: name,
        days: days.len(),
    });

    let Some(comparison) = compare_windows(&days, config.window_days) else {
        return skip(
            name,
            SkipReason::InsufficientHistory {
                days: days.len(),
                required: config.required_days(),
            },
            observer,
        );
    };
    observer.on_event(&AnalysisEvent::WindowCompared {
        campaign: name,
        summary: &comparison.summary,
    });

    let insights = metric_insights(&comparison.summary);
    let hypotheses = generate_hypotheses(&comparison.summary);
    observer.on_event(&AnalysisEvent::HypothesesGenerated {
        campaign: name,
        count: hypotheses.len(),
    });

    let significance = assess_significance(&comparison);
    let evaluation =
        evaluate_or_degrade(config.strategy, &comparison, &significance, name, observer);
    observer.on_event(&AnalysisEvent::Evaluated {
        campaign: name,
        impact: evaluation.impact,
        severity: evaluation.severity,
    });

    let totals = campaign_totals(campaign);
    let messages: Vec<&str> = campaign.creative_messages().collect();
    let creative = recommend(
        config.creative_trigger,
        name,
        &totals,
        &messages,
        config.ctr_threshold,
        Some(&evaluation),
    );
    match &creative {
        Some(bundle) => observer.on_event(&AnalysisEvent::CreativeGenerated {
            campaign: name,
            trigger: bundle.trigger,
        }),
        None => observer.on_event(&AnalysisEvent::CreativeNotNeeded { campaign: name }),
    }

    CampaignOutcome::Analyzed(Box::new(CampaignAnalysis {
        campaign: name.to_string(),
        days_analyzed: days.len(),
        window: comparison.summary,
        insights,
        hypotheses,
        evaluation,
        significance,
        creative,
    }))
}

/// Analyze every campaign sequentially, preserving input order.
pub fn analyze_all(
    campaigns: &[CampaignRecords],
    config: &AnalysisConfig,
    observer: &dyn AnalysisObserver,
) -> RunAnalysis {
    RunAnalysis::from_outcomes(campaigns.iter().map(|campaign| {
        (
            campaign.campaign_name.clone(),
            analyze_campaign(campaign, config, observer),
        )
    }))
}

fn skip(name: &str, reason: SkipReason, observer: &dyn AnalysisObserver) -> CampaignOutcome {
    observer.on_event(&AnalysisEvent::CampaignSkipped {
        campaign: name,
        reason,
    });
    CampaignOutcome::Skipped(reason)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
