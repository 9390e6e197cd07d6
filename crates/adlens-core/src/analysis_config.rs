use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which validator produces a campaign's `EvaluationResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrategy {
    /// Fixed relative-change thresholds on CTR, ROAS and CPC.
    #[default]
    Rules,
    /// Two-sample z-tests on the daily CTR, ROAS and CPC series.
    Significance,
}

impl std::fmt::Display for ValidationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationStrategy::Rules => write!(f, "rules"),
            ValidationStrategy::Significance => write!(f, "significance"),
        }
    }
}

impl std::str::FromStr for ValidationStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rules" => Ok(ValidationStrategy::Rules),
            "significance" => Ok(ValidationStrategy::Significance),
            other => Err(ConfigError::Validation(format!(
                "unknown validation strategy '{other}'; expected 'rules' or 'significance'"
            ))),
        }
    }
}

/// Which condition makes a campaign eligible for creative recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeTriggerMode {
    /// Aggregate CTR below `ctr_threshold`.
    LowCtr,
    /// Evaluation impact of medium or high.
    Impact,
    /// Either of the above.
    #[default]
    Either,
}

/// Read-only analysis settings handed to the engine for every campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length in days of both the baseline and the recent window.
    pub window_days: usize,
    /// Aggregate CTR below which creatives are recommended.
    pub ctr_threshold: f64,
    /// Campaigns with fewer raw rows are skipped before any metric work.
    pub min_rows_per_campaign: usize,
    pub strategy: ValidationStrategy,
    pub creative_trigger: CreativeTriggerMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            ctr_threshold: 0.01,
            min_rows_per_campaign: 3,
            strategy: ValidationStrategy::Rules,
            creative_trigger: CreativeTriggerMode::Either,
        }
    }
}

impl AnalysisConfig {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when the window is empty or the CTR
    /// threshold lies outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days == 0 {
            return Err(ConfigError::Validation(
                "window_days must be at least 1".to_string(),
            ));
        }
        if !(self.ctr_threshold > 0.0 && self.ctr_threshold <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "ctr_threshold {} must be in (0, 1]",
                self.ctr_threshold
            )));
        }
        Ok(())
    }

    /// Days of history required before a campaign can be compared.
    #[must_use]
    pub fn required_days(&self) -> usize {
        self.window_days.saturating_mul(2)
    }
}

/// Load and validate analysis settings from a YAML file.
///
/// A missing file is not an error: defaults are returned. Fields absent from
/// the file keep their default values.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_analysis_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: AnalysisConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}
