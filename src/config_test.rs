// Unit tests for suite configuration

use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = SuiteConfig::default();
    assert_eq!(config.base_url, "http://localhost:3000");
    assert_eq!(config.browser, BrowserType::Firefox);
    assert!(config.headless);
    assert_eq!(config.viewport, None);
    assert_eq!(config.screenshot_dir, PathBuf::from("screenshots"));
    assert!(!config.capture_console);
    assert_eq!(config.readiness, LoadState::NetworkIdle);
    assert_eq!(config.timeouts.navigation(), Duration::from_secs(30));
    assert_eq!(config.timeouts.action(), Duration::from_secs(5));
    assert_eq!(config.timeouts.visibility(), Duration::ZERO);
}

#[test]
fn test_env_overrides() {
    let config = SuiteConfig::default()
        .with_env_overrides(lookup(&[
            ("PAGEWRIGHT_BASE_URL", "https://staging.example.com"),
            ("PAGEWRIGHT_BROWSER", "chrome"),
            ("PAGEWRIGHT_HEADLESS", "false"),
            ("PAGEWRIGHT_VIEWPORT", "375x667"),
            ("PAGEWRIGHT_SCREENSHOT_DIR", "/tmp/shots"),
            ("PAGEWRIGHT_TIMESTAMP_SCREENSHOTS", "yes"),
            ("PAGEWRIGHT_CAPTURE_CONSOLE", "1"),
            ("PAGEWRIGHT_READINESS", "load"),
            ("PAGEWRIGHT_NAVIGATION_TIMEOUT_MS", "10000"),
            ("PAGEWRIGHT_ACTION_TIMEOUT_MS", "750"),
        ]))
        .unwrap();

    assert_eq!(config.base_url, "https://staging.example.com");
    assert_eq!(config.browser, BrowserType::Chrome);
    assert!(!config.headless);
    assert_eq!(config.viewport, Some(ViewportSize::MOBILE));
    assert_eq!(config.screenshot_dir, PathBuf::from("/tmp/shots"));
    assert!(config.timestamp_screenshots);
    assert!(config.capture_console);
    assert_eq!(config.readiness, LoadState::Load);
    assert_eq!(config.timeouts.navigation_ms, 10_000);
    assert_eq!(config.timeouts.action_ms, 750);
}

#[test]
fn test_env_overrides_ignore_other_vars() {
    let config = SuiteConfig::default()
        .with_env_overrides(lookup(&[("BASE_URL", "http://ignored")]))
        .unwrap();
    assert_eq!(config, SuiteConfig::default());
}

#[test]
fn test_invalid_env_values() {
    assert!(
        SuiteConfig::default()
            .with_env_overrides(lookup(&[("PAGEWRIGHT_HEADLESS", "maybe")]))
            .is_err()
    );
    assert!(
        SuiteConfig::default()
            .with_env_overrides(lookup(&[("PAGEWRIGHT_BROWSER", "netscape")]))
            .is_err()
    );
    assert!(
        SuiteConfig::default()
            .with_env_overrides(lookup(&[("PAGEWRIGHT_ACTION_TIMEOUT_MS", "soon")]))
            .is_err()
    );
    assert!(
        SuiteConfig::default()
            .with_env_overrides(lookup(&[("PAGEWRIGHT_VIEWPORT", "big")]))
            .is_err()
    );
}

#[test]
fn test_from_file_partial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suite.json");
    std::fs::write(
        &path,
        r#"{ "base_url": "http://127.0.0.1:8080", "browser": "chrome", "timeouts": { "action_ms": 1000 } }"#,
    )
    .unwrap();

    let config = SuiteConfig::from_file(&path).unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:8080");
    assert_eq!(config.browser, BrowserType::Chrome);
    assert_eq!(config.timeouts.action_ms, 1000);
    // Unspecified fields keep their defaults
    assert_eq!(config.timeouts.navigation_ms, 30_000);
    assert!(config.headless);
}

#[test]
fn test_from_file_errors() {
    assert!(SuiteConfig::from_file("/nonexistent/suite.json").is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = SuiteConfig::from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid config file"));
}

#[test]
fn test_resolve_url() {
    let config = SuiteConfig::default();
    assert_eq!(
        config.resolve_url("/grc/auth/signin").unwrap(),
        "http://localhost:3000/grc/auth/signin"
    );
    assert_eq!(config.resolve_url("/").unwrap(), "http://localhost:3000/");
    assert_eq!(
        config.resolve_url("https://example.com/login").unwrap(),
        "https://example.com/login"
    );
}

#[test]
fn test_resolve_url_invalid_base() {
    let config = SuiteConfig {
        base_url: "not a url".to_string(),
        ..SuiteConfig::default()
    };
    assert!(config.resolve_url("/login").is_err());
}
