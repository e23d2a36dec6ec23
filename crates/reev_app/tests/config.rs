use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reev_app::{apply_env_overrides, load_config, AppConfig};
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = load_config(&temp.path().join("reev.ron")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn ron_file_is_parsed_with_defaults_for_missing_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("reev.ron");
    fs::write(
        &path,
        r#"(api_base_url: Some("https://reev.example.com/internal/"), request_timeout_secs: Some(5))"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(
        config.api_base_url.as_deref(),
        Some("https://reev.example.com/internal/")
    );
    assert_eq!(config.data_dir, PathBuf::from("./reev_data"));

    let client = config.client_config();
    assert_eq!(client.request_timeout, Some(Duration::from_secs(5)));
    assert_eq!(
        client.resolved_base_url().unwrap().as_str(),
        "https://reev.example.com/internal/"
    );
}

#[test]
fn malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("reev.ron");
    fs::write(&path, "(api_base_url: ").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing config"));
}

#[test]
fn environment_overrides_file_values() {
    let config = AppConfig {
        api_base_url: Some("https://file.example.com/".to_string()),
        ..AppConfig::default()
    };

    let config = apply_env_overrides(
        config,
        env(&[
            ("REEV_API_BASE_URL", "https://env.example.com/"),
            ("REEV_CSRF_TOKEN", "token"),
        ]),
    );

    assert_eq!(config.api_base_url.as_deref(), Some("https://env.example.com/"));
    assert_eq!(config.csrf_token.as_deref(), Some("token"));
}

#[test]
fn blank_environment_values_are_ignored() {
    let config = apply_env_overrides(AppConfig::default(), env(&[("REEV_CSRF_TOKEN", "  ")]));
    assert_eq!(config, AppConfig::default());
}
