use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SuiteConfig;
use crate::errors::PageResult;
use crate::handle::PageHandle;
use crate::locator::Locator;
use crate::page::BasePage;
use crate::types::LoadState;

/// Landmark selectors most pages share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericConfig {
    pub path: String,
    pub heading_css: String,
    pub navigation_css: String,
    pub main_css: String,
    pub footer_css: String,
    /// Bound for the DOM-content-loaded check
    pub loaded_timeout_ms: u64,
}

impl Default for GenericConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            heading_css: "h1".to_string(),
            navigation_css: "nav".to_string(),
            main_css: "main, [role='main']".to_string(),
            footer_css: "footer".to_string(),
            loaded_timeout_ms: 5_000,
        }
    }
}

/// Placeholder page object for screens without dedicated locators
pub struct GenericPage<'a, H: PageHandle + ?Sized> {
    base: BasePage<'a, H>,
    config: GenericConfig,
    heading: Locator,
    navigation_menu: Locator,
    main_content: Locator,
    footer: Locator,
}

impl<'a, H: PageHandle + ?Sized> GenericPage<'a, H> {
    pub fn new(handle: &'a H, suite: &'a SuiteConfig) -> Self {
        Self::with_config(handle, suite, GenericConfig::default())
    }

    pub fn with_config(handle: &'a H, suite: &'a SuiteConfig, config: GenericConfig) -> Self {
        Self {
            base: BasePage::new(handle, suite),
            heading: Locator::css("page heading", &config.heading_css),
            navigation_menu: Locator::css("navigation menu", &config.navigation_css),
            main_content: Locator::css("main content", &config.main_css),
            footer: Locator::css("footer", &config.footer_css),
            config,
        }
    }

    pub fn base(&self) -> &BasePage<'a, H> {
        &self.base
    }

    pub fn heading(&self) -> &Locator {
        &self.heading
    }

    pub fn main_content(&self) -> &Locator {
        &self.main_content
    }

    /// Navigate to the configured path, or `url` when given
    pub async fn navigate(&self, url: Option<&str>) -> PageResult<()> {
        self.base
            .navigate(url.unwrap_or(&self.config.path))
            .await
    }

    pub async fn page_title(&self) -> PageResult<String> {
        self.base.title().await
    }

    pub async fn current_url(&self) -> String {
        self.base.current_url().await
    }

    /// DOM content loaded within the configured bound
    pub async fn is_page_loaded(&self) -> bool {
        self.base
            .wait_for_load_state(
                LoadState::DomContentLoaded,
                Duration::from_millis(self.config.loaded_timeout_ms),
            )
            .await
            .is_ok()
    }

    pub async fn wait_for_page_ready(&self) -> PageResult<()> {
        self.base
            .wait_for_load_state(LoadState::NetworkIdle, self.base.config().timeouts.navigation())
            .await
    }

    /// Main content must become visible
    pub async fn verify_page_loaded(&self) -> PageResult<()> {
        self.base.expect_visible(&self.main_content).await
    }

    pub async fn heading_text(&self) -> Option<String> {
        if !self.base.is_element_visible(&self.heading).await {
            return None;
        }
        self.base.text(&self.heading).await.ok()
    }

    pub async fn is_navigation_visible(&self) -> bool {
        self.base.is_element_visible(&self.navigation_menu).await
    }

    pub async fn is_footer_visible(&self) -> bool {
        self.base.is_element_visible(&self.footer).await
    }
}

#[cfg(test)]
#[path = "generic_test.rs"]
mod generic_test;
