use anyhow::{Context, Result};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::console::CAPTURE_SCRIPT;
use crate::errors::HandleError;
use crate::handle::{HandleResult, PageHandle};
use crate::locator::Locator;
use crate::types::{LoadState, ViewportSize};
use crate::webdriver_manager::GLOBAL_WEBDRIVER_MANAGER;

/// How often readiness is re-polled
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// No new resource entries for this long counts as network idle
const NETWORK_QUIET: Duration = Duration::from_millis(500);

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    pub fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }

    /// WebDriver capabilities for a session with the given settings
    pub fn capabilities(
        &self,
        headless: bool,
        viewport: Option<ViewportSize>,
        profile_dir: Option<&std::path::Path>,
    ) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();

        match self {
            BrowserType::Firefox => {
                let mut args = Vec::new();
                if headless {
                    args.push("--headless".to_string());
                }
                if let Some(vp) = viewport {
                    args.push(format!("--width={}", vp.width));
                    args.push(format!("--height={}", vp.height));
                }
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
            BrowserType::Chrome => {
                let mut args = vec!["--no-sandbox".to_string()];
                if headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }
                if let Some(vp) = viewport {
                    args.push(format!("--window-size={},{}", vp.width, vp.height));
                }
                if let Some(dir) = profile_dir {
                    args.push(format!("--user-data-dir={}", dir.display()));
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
        }

        caps
    }
}

/// One browser tab driven over WebDriver
pub struct WebDriverPage {
    client: Client,
    browser_type: BrowserType,
    capture_console: bool,
    // Chrome needs its own user-data-dir; removed when the page is dropped
    _profile_dir: Option<tempfile::TempDir>,
}

impl WebDriverPage {
    /// Open a new session using the browser settings from `config`
    pub async fn connect(config: &SuiteConfig) -> Result<Self> {
        let browser_type = config.browser;
        info!("Connecting to {:?} WebDriver", browser_type);

        let webdriver_url = GLOBAL_WEBDRIVER_MANAGER
            .ensure_driver(&browser_type)
            .await?;

        let profile_dir = match browser_type {
            BrowserType::Chrome => Some(
                tempfile::Builder::new()
                    .prefix("pagewright-chrome-")
                    .tempdir()?,
            ),
            BrowserType::Firefox => None,
        };

        let caps = browser_type.capabilities(
            config.headless,
            config.viewport,
            profile_dir.as_ref().map(|d| d.path()),
        );

        debug!("Connecting to WebDriver at {}", webdriver_url);
        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(&webdriver_url)
            .await
            .with_context(|| format!("Failed to connect to WebDriver at {}", webdriver_url))?;

        if let Some(vp) = config.viewport {
            debug!("Setting viewport to {}", vp);
            if let Err(e) = client.set_window_size(vp.width, vp.height).await {
                debug!("Note: Could not set window size: {}", e);
            }
        }

        Ok(WebDriverPage {
            client,
            browser_type,
            capture_console: config.capture_console,
            _profile_dir: profile_dir,
        })
    }

    pub fn browser_type(&self) -> BrowserType {
        self.browser_type
    }

    /// End the WebDriver session
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }

    async fn first(&self, locator: &Locator) -> HandleResult<Element> {
        let query = locator.query();
        debug!("Resolving {}", locator);
        self.client
            .find(query.as_fantoccini())
            .await
            .map_err(|e| map_cmd_error(e, locator))
    }

    async fn all(&self, locator: &Locator) -> HandleResult<Vec<Element>> {
        let query = locator.query();
        self.client
            .find_all(query.as_fantoccini())
            .await
            .map_err(|e| map_cmd_error(e, locator))
    }

    async fn ready_state(&self) -> HandleResult<String> {
        let value = self
            .client
            .execute("return document.readyState;", vec![])
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn resource_count(&self) -> HandleResult<u64> {
        let value = self
            .client
            .execute(
                "return performance.getEntriesByType('resource').length;",
                vec![],
            )
            .await?;
        Ok(value.as_u64().unwrap_or(0))
    }

    /// Install the console hook on the current document. The script is a
    /// no-op on a document that already has it.
    async fn install_console_capture(&self) {
        if !self.capture_console {
            return;
        }
        // Some documents refuse script injection
        if let Err(e) = self.client.execute(CAPTURE_SCRIPT, vec![]).await {
            debug!("Console capture not installed: {}", e);
        }
    }
}

fn map_cmd_error(err: fantoccini::error::CmdError, locator: &Locator) -> HandleError {
    if err.is_miss() {
        return HandleError::NoSuchElement(locator.to_string());
    }
    let msg = err.to_string();
    if msg.contains("not interactable") || msg.contains("invalid element state") {
        HandleError::NotInteractable(locator.to_string())
    } else {
        let closed = HandleError::Driver(err);
        if closed.is_closed() {
            HandleError::Closed
        } else {
            closed
        }
    }
}

fn map_driver_error(err: fantoccini::error::CmdError) -> HandleError {
    let err = HandleError::Driver(err);
    if err.is_closed() { HandleError::Closed } else { err }
}

/// WebDriver code points for the keys page objects press
fn key_code(key: &str) -> String {
    match key {
        "Enter" => '\u{E007}'.to_string(),
        "Tab" => '\u{E004}'.to_string(),
        "Escape" => '\u{E00C}'.to_string(),
        "Backspace" => '\u{E003}'.to_string(),
        "ArrowDown" => '\u{E015}'.to_string(),
        "ArrowUp" => '\u{E013}'.to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl PageHandle for WebDriverPage {
    async fn goto(&self, url: &str) -> HandleResult<()> {
        info!("Navigating to {}", url);
        self.client.goto(url).await.map_err(|e| {
            let err = map_driver_error(e);
            match err {
                HandleError::Closed => HandleError::Closed,
                other => HandleError::Unreachable {
                    url: url.to_string(),
                    message: other.to_string(),
                },
            }
        })?;

        self.install_console_capture().await;
        Ok(())
    }

    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> HandleResult<()> {
        let deadline = Instant::now() + timeout;

        loop {
            let ready = self.ready_state().await.map_err(|e| match e {
                HandleError::Driver(err) => map_driver_error(err),
                other => other,
            })?;
            let reached = match state {
                LoadState::DomContentLoaded => ready == "interactive" || ready == "complete",
                LoadState::Load | LoadState::NetworkIdle => ready == "complete",
            };
            if reached {
                break;
            }
            if Instant::now() >= deadline {
                return Err(HandleError::Timeout(format!("load state {:?}", state)));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        if state == LoadState::NetworkIdle {
            let mut last = self.resource_count().await?;
            let mut quiet_since = Instant::now();
            while quiet_since.elapsed() < NETWORK_QUIET {
                if Instant::now() >= deadline {
                    return Err(HandleError::Timeout("network idle".to_string()));
                }
                tokio::time::sleep(POLL_INTERVAL).await;
                let current = self.resource_count().await?;
                if current != last {
                    last = current;
                    quiet_since = Instant::now();
                }
            }
        }

        // Covers documents reached by clicks and redirects, not only goto
        self.install_console_capture().await;
        debug!("Reached load state {:?}", state);
        Ok(())
    }

    async fn title(&self) -> HandleResult<String> {
        self.client.title().await.map_err(map_driver_error)
    }

    async fn current_url(&self) -> HandleResult<String> {
        Ok(self
            .client
            .current_url()
            .await
            .map_err(map_driver_error)?
            .to_string())
    }

    async fn count(&self, locator: &Locator) -> HandleResult<usize> {
        Ok(self.all(locator).await?.len())
    }

    async fn is_visible(&self, locator: &Locator) -> HandleResult<bool> {
        let elements = self.all(locator).await?;
        match elements.first() {
            Some(element) => match element.is_displayed().await {
                Ok(displayed) => Ok(displayed),
                // Element went stale between lookup and query
                Err(e) if e.to_string().contains("stale element") => Ok(false),
                Err(e) => Err(map_cmd_error(e, locator)),
            },
            None => Ok(false),
        }
    }

    async fn is_enabled(&self, locator: &Locator) -> HandleResult<bool> {
        let element = self.first(locator).await?;
        element.is_enabled().await.map_err(|e| map_cmd_error(e, locator))
    }

    async fn is_checked(&self, locator: &Locator) -> HandleResult<bool> {
        let element = self.first(locator).await?;
        element.is_selected().await.map_err(|e| map_cmd_error(e, locator))
    }

    async fn text_content(&self, locator: &Locator) -> HandleResult<String> {
        let element = self.first(locator).await?;
        element.text().await.map_err(|e| map_cmd_error(e, locator))
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> HandleResult<Option<String>> {
        let element = self.first(locator).await?;
        element.attr(name).await.map_err(|e| map_cmd_error(e, locator))
    }

    async fn input_value(&self, locator: &Locator) -> HandleResult<String> {
        let element = self.first(locator).await?;
        let value = element
            .prop("value")
            .await
            .map_err(|e| map_cmd_error(e, locator))?;
        Ok(value.unwrap_or_default())
    }

    async fn click(&self, locator: &Locator) -> HandleResult<()> {
        let element = self.first(locator).await?;
        info!("Clicking {}", locator.name());
        element.click().await.map_err(|e| map_cmd_error(e, locator))
    }

    async fn fill(&self, locator: &Locator, value: &str) -> HandleResult<()> {
        let element = self.first(locator).await?;
        info!("Filling {}", locator.name());
        element.clear().await.map_err(|e| map_cmd_error(e, locator))?;
        if !value.is_empty() {
            element
                .send_keys(value)
                .await
                .map_err(|e| map_cmd_error(e, locator))?;
        }
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> HandleResult<()> {
        let element = self.first(locator).await?;
        element.clear().await.map_err(|e| map_cmd_error(e, locator))
    }

    async fn press(&self, locator: &Locator, key: &str) -> HandleResult<()> {
        let element = self.first(locator).await?;
        debug!("Pressing {} on {}", key, locator.name());
        element
            .send_keys(&key_code(key))
            .await
            .map_err(|e| map_cmd_error(e, locator))
    }

    async fn set_viewport(&self, viewport: ViewportSize) -> HandleResult<()> {
        debug!("Setting viewport to {}", viewport);
        self.client
            .set_window_size(viewport.width, viewport.height)
            .await
            .map_err(map_driver_error)
    }

    async fn screenshot(&self) -> HandleResult<Vec<u8>> {
        self.client.screenshot().await.map_err(map_driver_error)
    }

    async fn evaluate(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> HandleResult<serde_json::Value> {
        debug!("Executing JavaScript: {}", script);
        self.client
            .execute(script, args)
            .await
            .map_err(|e| match map_driver_error(e) {
                HandleError::Driver(err) => HandleError::Script(err.to_string()),
                other => other,
            })
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
