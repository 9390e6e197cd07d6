use adlens_engine::{CampaignAnalysis, CreativeBundle, RunAnalysis, SkippedCampaign};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::RunMetadata;

#[derive(Serialize)]
struct InsightsPayload<'a> {
    #[serde(flatten)]
    meta: &'a RunMetadata,
    campaigns: &'a [CampaignAnalysis],
    skipped: &'a [SkippedCampaign],
}

#[derive(Serialize)]
struct CreativesPayload<'a> {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    input_fingerprint: &'a str,
    creatives: Vec<&'a CreativeBundle>,
}

/// Full per-campaign analysis, pretty-printed.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn insights_json(meta: &RunMetadata, run: &RunAnalysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&InsightsPayload {
        meta,
        campaigns: &run.analyses,
        skipped: &run.skipped,
    })
}

/// Creative bundles only, in campaign order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn creatives_json(meta: &RunMetadata, run: &RunAnalysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CreativesPayload {
        run_id: meta.run_id,
        generated_at: meta.generated_at,
        input_fingerprint: &meta.input_fingerprint,
        creatives: run.creatives().collect(),
    })
}
