use std::collections::HashMap;
use std::env::VarError;

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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GEMINI_API_KEY", "test-gemini-key");
    m
}

#[test]
fn parse_environment_accepts_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "IRIDE_ENV"));
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GEMINI_API_KEY"),
        "expected MissingEnvVar(GEMINI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = full_env();
    map.insert("GEMINI_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).expect("valid config");

    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.gemini_api_key, "test-gemini-key");
    assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(config.research_model, "gemini-2.5-flash");
    assert_eq!(config.analysis_model, "gemini-3-pro-preview");
    assert_eq!(config.thinking_budget, 16_000);
    assert_eq!(config.request_timeout_secs, 180);
    assert_eq!(config.user_agent, "iride/0.1 (seo-analysis)");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("IRIDE_ENV", "production");
    map.insert("IRIDE_BIND_ADDR", "127.0.0.1:8080");
    map.insert("IRIDE_RESEARCH_MODEL", "gemini-2.5-pro");
    map.insert("IRIDE_THINKING_BUDGET", "4096");
    map.insert("IRIDE_REQUEST_TIMEOUT_SECS", "30");

    let config = build_app_config(lookup_from_map(&map)).expect("valid config");

    assert_eq!(config.env, Environment::Production);
    assert_eq!(config.bind_addr.port(), 8080);
    assert_eq!(config.research_model, "gemini-2.5-pro");
    assert_eq!(config.thinking_budget, 4096);
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn build_app_config_rejects_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("IRIDE_BIND_ADDR", "not-an-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "IRIDE_BIND_ADDR"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_thinking_budget() {
    let mut map = full_env();
    map.insert("IRIDE_THINKING_BUDGET", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "IRIDE_THINKING_BUDGET"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = full_env();
    map.insert("IRIDE_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let config = build_app_config(lookup_from_map(&map)).expect("valid config");
    let debug = format!("{config:?}");
    assert!(!debug.contains("test-gemini-key"));
    assert!(debug.contains("[redacted]"));
}
