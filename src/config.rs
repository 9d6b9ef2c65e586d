use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::types::{LoadState, ViewportSize};
use crate::webdriver::BrowserType;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "PAGEWRIGHT_";

/// Upper bounds for every wait the page layer performs, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Navigation plus readiness signal
    pub navigation_ms: u64,
    /// Waits before acting on a control
    pub action_ms: u64,
    /// Resolution window for plain visibility checks (0 = check once)
    pub visibility_ms: u64,
    /// How long read accessors wait for an error region to show up
    pub error_probe_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation_ms: 30_000,
            action_ms: 5_000,
            visibility_ms: 0,
            error_probe_ms: 2_000,
        }
    }
}

impl Timeouts {
    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn action(&self) -> Duration {
        Duration::from_millis(self.action_ms)
    }

    pub fn visibility(&self) -> Duration {
        Duration::from_millis(self.visibility_ms)
    }

    pub fn error_probe(&self) -> Duration {
        Duration::from_millis(self.error_probe_ms)
    }
}

/// Per-scenario configuration.
///
/// Viewport and console capture live here rather than being attached to the
/// browser as side effects, so each scenario states what it runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Origin relative paths are resolved against
    pub base_url: String,
    pub browser: BrowserType,
    pub headless: bool,
    pub viewport: Option<ViewportSize>,
    pub screenshot_dir: PathBuf,
    /// Append `_YYYYmmdd_HHMMSS` to screenshot file names
    pub timestamp_screenshots: bool,
    pub capture_console: bool,
    pub readiness: LoadState,
    pub timeouts: Timeouts,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            browser: BrowserType::Firefox,
            headless: true,
            viewport: None,
            screenshot_dir: PathBuf::from("screenshots"),
            timestamp_screenshots: false,
            capture_console: false,
            readiness: LoadState::NetworkIdle,
            timeouts: Timeouts::default(),
        }
    }
}

impl SuiteConfig {
    /// Defaults, then `PAGEWRIGHT_CONFIG` (a JSON file) if set, then
    /// individual `PAGEWRIGHT_*` variables
    pub fn load() -> Result<Self> {
        let config = match std::env::var(format!("{ENV_PREFIX}CONFIG")) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Apply overrides from a variable lookup (std::env::var in practice)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(base_url) = var("BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(browser) = var("BROWSER") {
            self.browser = browser.parse()?;
        }
        if let Some(headless) = var("HEADLESS") {
            self.headless = parse_bool("HEADLESS", &headless)?;
        }
        if let Some(viewport) = var("VIEWPORT") {
            self.viewport = Some(ViewportSize::parse(&viewport)?);
        }
        if let Some(dir) = var("SCREENSHOT_DIR") {
            self.screenshot_dir = PathBuf::from(dir);
        }
        if let Some(stamp) = var("TIMESTAMP_SCREENSHOTS") {
            self.timestamp_screenshots = parse_bool("TIMESTAMP_SCREENSHOTS", &stamp)?;
        }
        if let Some(capture) = var("CAPTURE_CONSOLE") {
            self.capture_console = parse_bool("CAPTURE_CONSOLE", &capture)?;
        }
        if let Some(readiness) = var("READINESS") {
            self.readiness = readiness.parse()?;
        }
        if let Some(ms) = var("NAVIGATION_TIMEOUT_MS") {
            self.timeouts.navigation_ms = parse_ms("NAVIGATION_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = var("ACTION_TIMEOUT_MS") {
            self.timeouts.action_ms = parse_ms("ACTION_TIMEOUT_MS", &ms)?;
        }

        debug!("Loaded suite config: {:?}", self);
        Ok(self)
    }

    /// Resolve `target` against the base URL. Absolute URLs pass through.
    pub fn resolve_url(&self, target: &str) -> Result<String> {
        if let Ok(absolute) = Url::parse(target) {
            return Ok(absolute.to_string());
        }
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;
        let joined = base
            .join(target)
            .with_context(|| format!("Cannot resolve {} against {}", target, self.base_url))?;
        Ok(joined.to_string())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid boolean for {}{}: {}", ENV_PREFIX, name, value),
    }
}

fn parse_ms(name: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .with_context(|| format!("Invalid milliseconds for {}{}: {}", ENV_PREFIX, name, value))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
