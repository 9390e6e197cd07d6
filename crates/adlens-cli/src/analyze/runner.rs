//! Concurrent per-campaign dispatch.

use std::sync::Arc;

use adlens_core::{AnalysisConfig, CampaignRecords};
use adlens_engine::{analyze_campaign, CampaignOutcome, RunAnalysis, TracingObserver};
use futures::stream::{self, StreamExt};

/// Analyze `campaigns` on the blocking pool, at most `max_concurrent` at a
/// time. Results come back in input order.
///
/// A campaign whose worker panics is logged and left out of the run.
///
/// # Errors
///
/// Returns an error only when every campaign's worker failed.
pub async fn analyze_concurrently(
    campaigns: Vec<CampaignRecords>,
    config: Arc<AnalysisConfig>,
    max_concurrent: usize,
) -> anyhow::Result<RunAnalysis> {
    let campaign_count = campaigns.len();

    let results: Vec<(String, Result<CampaignOutcome, tokio::task::JoinError>)> =
        stream::iter(campaigns)
            .map(|campaign| {
                let config = Arc::clone(&config);
                let name = campaign.campaign_name.clone();
                async move {
                    let outcome = tokio::task::spawn_blocking(move || {
                        analyze_campaign(&campaign, &config, &TracingObserver)
                    })
                    .await;
                    (name, outcome)
                }
            })
            .buffered(max_concurrent.max(1))
            .collect()
            .await;

    let mut failed_campaigns = 0usize;
    let outcomes: Vec<(String, CampaignOutcome)> = results
        .into_iter()
        .filter_map(|(name, result)| match result {
            Ok(outcome) => Some((name, outcome)),
            Err(e) => {
                tracing::error!(campaign = %name, error = %e, "campaign analysis failed");
                failed_campaigns += 1;
                None
            }
        })
        .collect();

    if failed_campaigns > 0 {
        tracing::warn!(
            failed_campaigns,
            total_campaigns = campaign_count,
            "some campaigns failed during analysis"
        );
        if failed_campaigns == campaign_count {
            anyhow::bail!("all {failed_campaigns} campaigns failed analysis");
        }
    }

    Ok(RunAnalysis::from_outcomes(outcomes))
}
