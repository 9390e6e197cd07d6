//! Shared domain records and configuration for the adlens workspace.

pub mod analysis_config;
pub mod app_config;
pub mod config;
pub mod records;

use thiserror::Error;

pub use analysis_config::{
    load_analysis_config, AnalysisConfig, CreativeTriggerMode, ValidationStrategy,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{CampaignRecord, CampaignRecords};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    ConfigFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ConfigFileParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
