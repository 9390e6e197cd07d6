//! The `validate` command: schema and history checks without analysis.

use std::path::Path;

use adlens_core::AppConfig;
use adlens_engine::metrics::daily_metrics;
use adlens_ingest::{group_by_campaign, load_dataset};
use anyhow::Context;

use crate::settings::{resolve_settings, Overrides};

/// Load the input, report row counts, and list which campaigns have enough
/// history for the configured window.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the input fails to load
/// (including a missing required column).
pub fn run_validate(app: &AppConfig, data: Option<&Path>) -> anyhow::Result<()> {
    let settings = resolve_settings(
        app,
        &Overrides {
            data: data.map(Path::to_path_buf),
            ..Overrides::default()
        },
    )?;

    let dataset = load_dataset(&settings.data_path)
        .with_context(|| format!("validating {}", settings.data_path.display()))?;
    let rows_read = dataset.rows_read;
    let rows_rejected = dataset.rows_rejected;
    let revenue_column = dataset
        .revenue_column
        .clone()
        .unwrap_or_else(|| "none (revenue treated as 0)".to_string());
    let campaigns = group_by_campaign(dataset.records);

    println!(
        "ok: {rows_read} rows ({rows_rejected} rejected), {} campaigns, revenue column: {revenue_column}",
        campaigns.len()
    );

    let required_days = settings.analysis.required_days();
    let min_rows = settings.analysis.min_rows_per_campaign;
    println!("{:<32}{:<8}{:<8}ELIGIBLE", "CAMPAIGN", "ROWS", "DAYS");
    for campaign in &campaigns {
        let days = daily_metrics(campaign).len();
        let eligible = campaign.row_count() >= min_rows && days >= required_days;
        println!(
            "{:<32}{:<8}{:<8}{}",
            campaign.campaign_name,
            campaign.row_count(),
            days,
            if eligible { "yes" } else { "no" }
        );
    }

    Ok(())
}
