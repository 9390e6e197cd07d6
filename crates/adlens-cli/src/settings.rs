//! Effective run settings: environment config, the analysis config file and
//! command-line overrides merged in that order.

use std::path::PathBuf;

use adlens_core::{load_analysis_config, AnalysisConfig, AppConfig, ValidationStrategy};
use anyhow::Context;

/// Command-line values that take precedence over file and environment
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub window_days: Option<usize>,
    pub ctr_threshold: Option<f64>,
    pub strategy: Option<ValidationStrategy>,
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub data_path: PathBuf,
    pub reports_dir: PathBuf,
    pub analysis: AnalysisConfig,
    pub max_concurrent_campaigns: usize,
}

/// Merge `app`, the analysis config file it points to, and `overrides`.
///
/// # Errors
///
/// Returns an error if the analysis config file is malformed or the merged
/// configuration fails validation.
pub fn resolve_settings(app: &AppConfig, overrides: &Overrides) -> anyhow::Result<RunSettings> {
    let mut analysis = load_analysis_config(&app.analysis_config_path).with_context(|| {
        format!(
            "loading analysis config from {}",
            app.analysis_config_path.display()
        )
    })?;

    if let Some(window_days) = overrides.window_days {
        analysis.window_days = window_days;
    }
    if let Some(threshold) = overrides.ctr_threshold {
        analysis.ctr_threshold = threshold;
    }
    if let Some(strategy) = overrides.strategy {
        analysis.strategy = strategy;
    }
    analysis
        .validate()
        .context("invalid analysis settings after command-line overrides")?;

    Ok(RunSettings {
        data_path: overrides
            .data
            .clone()
            .unwrap_or_else(|| app.data_path.clone()),
        reports_dir: overrides
            .reports_dir
            .clone()
            .unwrap_or_else(|| app.reports_dir.clone()),
        analysis,
        max_concurrent_campaigns: app.max_concurrent_campaigns.max(1),
    })
}

/// Print the effective configuration without overrides.
///
/// # Errors
///
/// Returns an error if the analysis config file cannot be loaded.
pub fn print_config(app: &AppConfig) -> anyhow::Result<()> {
    let settings = resolve_settings(app, &Overrides::default())?;
    let config_state = if app.analysis_config_path.exists() {
        "loaded"
    } else {
        "not found, defaults used"
    };

    println!("{:<28}{}", "environment", app.env);
    println!("{:<28}{}", "log_level", app.log_level);
    println!("{:<28}{}", "data_path", settings.data_path.display());
    println!("{:<28}{}", "reports_dir", settings.reports_dir.display());
    println!(
        "{:<28}{} ({config_state})",
        "analysis_config",
        app.analysis_config_path.display()
    );
    println!(
        "{:<28}{}",
        "max_concurrent_campaigns", settings.max_concurrent_campaigns
    );
    println!("{:<28}{}", "window_days", settings.analysis.window_days);
    println!("{:<28}{}", "ctr_threshold", settings.analysis.ctr_threshold);
    println!(
        "{:<28}{}",
        "min_rows_per_campaign", settings.analysis.min_rows_per_campaign
    );
    println!("{:<28}{}", "strategy", settings.analysis.strategy);
    println!(
        "{:<28}{:?}",
        "creative_trigger", settings.analysis.creative_trigger
    );
    Ok(())
}
