//! Structured progress events emitted by the analysis pipeline.
//!
//! The engine reports through an [`AnalysisObserver`] supplied by the caller
//! and never depends on whether anything is listening.

use crate::error::EvaluationFailure;
use crate::types::{CreativeTrigger, Impact, SkipReason, WindowSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent<'a> {
    CampaignStarted {
        campaign: &'a str,
        rows: usize,
    },
    CampaignSkipped {
        campaign: &'a str,
        reason: SkipReason,
    },
    MetricsComputed {
        campaign: &'a str,
        days: usize,
    },
    WindowCompared {
        campaign: &'a str,
        summary: &'a WindowSummary,
    },
    HypothesesGenerated {
        campaign: &'a str,
        count: usize,
    },
    Evaluated {
        campaign: &'a str,
        impact: Impact,
        severity: u32,
    },
    EvaluationDegraded {
        campaign: &'a str,
        failure: &'a EvaluationFailure,
    },
    CreativeGenerated {
        campaign: &'a str,
        trigger: CreativeTrigger,
    },
    CreativeNotNeeded {
        campaign: &'a str,
    },
}

/// Receiver for [`AnalysisEvent`]s. Shared across worker threads.
pub trait AnalysisObserver: Send + Sync {
    fn on_event(&self, event: &AnalysisEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {
    fn on_event(&self, _event: &AnalysisEvent<'_>) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        match event {
            AnalysisEvent::CampaignStarted { campaign, rows } => {
                tracing::debug!(campaign, rows, "analyzing campaign");
            }
            AnalysisEvent::CampaignSkipped { campaign, reason } => {
                tracing::info!(campaign, reason = %reason, "campaign skipped");
            }
            AnalysisEvent::MetricsComputed { campaign, days } => {
                tracing::debug!(campaign, days, "daily metrics computed");
            }
            AnalysisEvent::WindowCompared { campaign, summary } => {
                tracing::debug!(
                    campaign,
                    ctr_change_pct = summary.ctr_change_pct,
                    roas_change_pct = summary.roas_change_pct,
                    "windows compared"
                );
            }
            AnalysisEvent::HypothesesGenerated { campaign, count } => {
                tracing::debug!(campaign, count, "hypotheses generated");
            }
            AnalysisEvent::Evaluated {
                campaign,
                impact,
                severity,
            } => {
                tracing::info!(campaign, impact = %impact, severity, "campaign evaluated");
            }
            AnalysisEvent::EvaluationDegraded { campaign, failure } => {
                tracing::warn!(campaign, error = %failure, "evaluation degraded to fallback");
            }
            AnalysisEvent::CreativeGenerated { campaign, trigger } => {
                tracing::info!(campaign, trigger = ?trigger, "creative suggestions generated");
            }
            AnalysisEvent::CreativeNotNeeded { campaign } => {
                tracing::debug!(campaign, "no creative suggestions needed");
            }
        }
    }
}
