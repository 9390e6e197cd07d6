use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ADLENS_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.data_path, Path::new("./data/campaigns.csv"));
    assert_eq!(cfg.reports_dir, Path::new("./reports"));
    assert_eq!(cfg.analysis_config_path, Path::new("./config/analysis.yaml"));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.max_concurrent_campaigns, 4);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("ADLENS_ENV", "production");
    map.insert("ADLENS_DATA_PATH", "/srv/ads.csv");
    map.insert("ADLENS_REPORTS_DIR", "/srv/out");
    map.insert("ADLENS_LOG_LEVEL", "debug");
    map.insert("ADLENS_MAX_CONCURRENT_CAMPAIGNS", "16");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.data_path, Path::new("/srv/ads.csv"));
    assert_eq!(cfg.reports_dir, Path::new("/srv/out"));
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.max_concurrent_campaigns, 16);
}

#[test]
fn build_app_config_fails_with_invalid_environment() {
    let mut map = HashMap::new();
    map.insert("ADLENS_ENV", "qa");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADLENS_ENV"),
        "expected InvalidEnvVar(ADLENS_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_concurrency() {
    let mut map = HashMap::new();
    map.insert("ADLENS_MAX_CONCURRENT_CAMPAIGNS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADLENS_MAX_CONCURRENT_CAMPAIGNS"),
        "expected InvalidEnvVar(ADLENS_MAX_CONCURRENT_CAMPAIGNS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_concurrency() {
    let mut map = HashMap::new();
    map.insert("ADLENS_MAX_CONCURRENT_CAMPAIGNS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref reason, .. }) if reason.contains("at least 1")),
        "expected zero concurrency to be rejected, got: {result:?}"
    );
}

#[test]
fn environment_display() {
    assert_eq!(Environment::Development.to_string(), "development");
    assert_eq!(Environment::Test.to_string(), "test");
    assert_eq!(Environment::Production.to_string(), "production");
}
