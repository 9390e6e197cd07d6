//! The `analyze` command: load, group, analyze concurrently, report.

mod runner;

use std::path::PathBuf;
use std::sync::Arc;

use adlens_core::{AppConfig, CampaignRecords, ValidationStrategy};
use adlens_ingest::{group_by_campaign, load_dataset};
use anyhow::Context;

use crate::report::{write_reports, ReportPaths, RunMetadata};
use crate::settings::{resolve_settings, Overrides};

pub use runner::analyze_concurrently;

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub data: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub window_days: Option<usize>,
    pub ctr_threshold: Option<f64>,
    pub strategy: Option<ValidationStrategy>,
    pub campaign: Option<String>,
    pub dry_run: bool,
}

impl AnalyzeOptions {
    fn overrides(&self) -> Overrides {
        Overrides {
            data: self.data.clone(),
            reports_dir: self.reports_dir.clone(),
            window_days: self.window_days,
            ctr_threshold: self.ctr_threshold,
            strategy: self.strategy,
        }
    }
}

/// Run a full analysis and write the report artifacts.
///
/// Returns the artifact paths, or `None` when nothing was written (dry run,
/// or no campaigns in the input).
///
/// # Errors
///
/// Returns an error if configuration is invalid, the input cannot be loaded,
/// the `--campaign` filter matches nothing, or reports cannot be written.
pub async fn run_analyze(
    app: &AppConfig,
    options: &AnalyzeOptions,
) -> anyhow::Result<Option<ReportPaths>> {
    let settings = resolve_settings(app, &options.overrides())?;

    let dataset = load_dataset(&settings.data_path).with_context(|| {
        format!(
            "loading campaign data from {}",
            settings.data_path.display()
        )
    })?;
    let rows_read = dataset.rows_read;
    let rows_rejected = dataset.rows_rejected;
    let fingerprint = dataset.fingerprint;

    let campaigns = select_campaigns(
        group_by_campaign(dataset.records),
        options.campaign.as_deref(),
    )?;

    if campaigns.is_empty() {
        println!(
            "no campaigns found in {}; nothing to analyze",
            settings.data_path.display()
        );
        return Ok(None);
    }

    if options.dry_run {
        let names: Vec<&str> = campaigns.iter().map(|c| c.campaign_name.as_str()).collect();
        println!(
            "dry-run: would analyze {} campaigns from {} rows: [{}]",
            campaigns.len(),
            rows_read,
            names.join(", ")
        );
        return Ok(None);
    }

    tracing::info!(
        campaigns = campaigns.len(),
        window_days = settings.analysis.window_days,
        strategy = %settings.analysis.strategy,
        max_concurrent = settings.max_concurrent_campaigns,
        "starting analysis"
    );

    let config = Arc::new(settings.analysis);
    let run = analyze_concurrently(
        campaigns,
        Arc::clone(&config),
        settings.max_concurrent_campaigns,
    )
    .await?;

    let meta = RunMetadata::new(
        &settings.data_path,
        fingerprint,
        rows_read,
        rows_rejected,
        (*config).clone(),
    );
    let paths = write_reports(&settings.reports_dir, &meta, &run)?;

    println!(
        "analyzed {} campaigns ({} skipped, {} with creative suggestions)",
        run.analyses.len(),
        run.skipped.len(),
        run.creatives().count()
    );
    println!("{:<12}{}", "insights", paths.insights.display());
    println!("{:<12}{}", "creatives", paths.creatives.display());
    println!("{:<12}{}", "report", paths.markdown.display());

    Ok(Some(paths))
}

/// Apply the optional `--campaign` filter.
fn select_campaigns(
    campaigns: Vec<CampaignRecords>,
    filter: Option<&str>,
) -> anyhow::Result<Vec<CampaignRecords>> {
    let Some(name) = filter else {
        return Ok(campaigns);
    };
    let selected: Vec<CampaignRecords> = campaigns
        .into_iter()
        .filter(|c| c.campaign_name == name)
        .collect();
    if selected.is_empty() {
        anyhow::bail!("campaign '{name}' not found in input");
    }
    Ok(selected)
}
