use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::config::SuiteConfig;
use crate::console;
use crate::errors::{PageError, PageResult};
use crate::handle::PageHandle;
use crate::locator::Locator;
use crate::page::BasePage;
use crate::types::{ConsoleMessage, ViewportSize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub path: String,
    /// Sizes walked by the responsive layout check
    pub viewports: Vec<ViewportSize>,
    /// Pause after each resize before checking the layout
    pub settle_ms: u64,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            viewports: vec![
                ViewportSize::DESKTOP,
                ViewportSize::TABLET,
                ViewportSize::MOBILE,
            ],
            settle_ms: 500,
        }
    }
}

pub struct HomePage<'a, H: PageHandle + ?Sized> {
    base: BasePage<'a, H>,
    config: HomeConfig,
    body: Locator,
}

impl<'a, H: PageHandle + ?Sized> HomePage<'a, H> {
    pub fn new(handle: &'a H, suite: &'a SuiteConfig) -> Self {
        Self::with_config(handle, suite, HomeConfig::default())
    }

    pub fn with_config(handle: &'a H, suite: &'a SuiteConfig, config: HomeConfig) -> Self {
        Self {
            base: BasePage::new(handle, suite),
            config,
            body: Locator::css("page body", "body"),
        }
    }

    pub fn base(&self) -> &BasePage<'a, H> {
        &self.base
    }

    pub async fn navigate(&self) -> PageResult<()> {
        self.base.navigate(&self.config.path).await
    }

    /// On the home route with a readable title
    pub async fn verify_page_loaded(&self) -> PageResult<()> {
        let expected = self
            .base
            .config()
            .resolve_url(&self.config.path)
            .map_err(|e| PageError::expectation("home URL", "a valid path", format!("{:#}", e)))?;
        let actual = self.base.current_url().await;
        if actual.trim_end_matches('/') != expected.trim_end_matches('/') {
            return Err(PageError::expectation("current URL", expected, actual));
        }
        self.base.title().await?;
        Ok(())
    }

    pub async fn page_title(&self) -> PageResult<String> {
        self.base.title().await
    }

    /// Resize through every configured viewport; the body must stay visible
    pub async fn verify_responsive_layout(&self) -> PageResult<()> {
        let handle = self.base.handle();
        for viewport in &self.config.viewports {
            info!("Checking layout at {}", viewport);
            handle
                .set_viewport(*viewport)
                .await
                .map_err(|e| PageError::query(format!("resize to {}", viewport), e))?;
            tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;
            if !self.base.is_element_visible(&self.body).await {
                return Err(PageError::expectation(
                    &self.body,
                    format!("visible at {}", viewport),
                    "hidden",
                ));
            }
        }
        Ok(())
    }

    /// `None` means the capture failed; the failure is already logged
    pub async fn take_screenshot(&self, name: Option<&str>) -> Option<PathBuf> {
        self.base.take_screenshot(name.unwrap_or("homepage")).await
    }

    /// Console errors since navigation. Always empty unless the suite runs
    /// with console capture enabled.
    pub async fn console_errors(&self) -> Vec<ConsoleMessage> {
        if !self.base.config().capture_console {
            return Vec::new();
        }
        console::errors(self.base.handle()).await
    }
}

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;
