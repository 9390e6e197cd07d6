use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings read from the environment.
///
/// Analysis thresholds live in [`crate::AnalysisConfig`]; this struct only
/// says where things are and how the run is hosted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub data_path: PathBuf,
    pub reports_dir: PathBuf,
    pub analysis_config_path: PathBuf,
    pub log_level: String,
    pub max_concurrent_campaigns: usize,
}
