use std::path::PathBuf;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::SuiteConfig;
use crate::errors::{HandleError, PageError, PageResult};
use crate::handle::PageHandle;
use crate::locator::Locator;
use crate::types::{LoadState, Presence};

/// Interval between visibility polls
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Navigation, readiness and introspection shared by every page object.
///
/// Borrows the handle, so a page object can never outlive the tab it drives.
pub struct BasePage<'a, H: PageHandle + ?Sized> {
    handle: &'a H,
    config: &'a SuiteConfig,
}

impl<'a, H: PageHandle + ?Sized> Clone for BasePage<'a, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, H: PageHandle + ?Sized> Copy for BasePage<'a, H> {}

impl<'a, H: PageHandle + ?Sized> BasePage<'a, H> {
    pub fn new(handle: &'a H, config: &'a SuiteConfig) -> Self {
        Self { handle, config }
    }

    pub fn handle(&self) -> &'a H {
        self.handle
    }

    pub fn config(&self) -> &'a SuiteConfig {
        self.config
    }

    /// Load `url` (relative to the base URL unless absolute) and wait for the
    /// configured readiness signal
    pub async fn navigate(&self, url: &str) -> PageResult<()> {
        let target = self
            .config
            .resolve_url(url)
            .map_err(|e| PageError::Navigation {
                url: url.to_string(),
                source: HandleError::Unreachable {
                    url: url.to_string(),
                    message: format!("{:#}", e),
                },
            })?;

        let timeout = self.config.timeouts.navigation();
        let started = Instant::now();
        let navigation = async {
            self.handle.goto(&target).await?;
            let remaining = timeout.saturating_sub(started.elapsed());
            self.handle
                .wait_for_load_state(self.config.readiness, remaining)
                .await
        };

        match tokio::time::timeout(timeout, navigation).await {
            Ok(Ok(())) => {
                info!("Loaded {} in {}ms", target, started.elapsed().as_millis());
                Ok(())
            }
            Ok(Err(source)) => Err(PageError::Navigation {
                url: target,
                source,
            }),
            Err(_) => Err(PageError::Navigation {
                url: target,
                source: HandleError::Timeout(format!(
                    "{:?} after {}ms",
                    self.config.readiness,
                    timeout.as_millis()
                )),
            }),
        }
    }

    /// Wait for a readiness signal on the current document
    pub async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> PageResult<()> {
        let current = self.current_url().await;
        match tokio::time::timeout(timeout, self.handle.wait_for_load_state(state, timeout)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(PageError::Navigation {
                url: current,
                source,
            }),
            Err(_) => Err(PageError::Navigation {
                url: current,
                source: HandleError::Timeout(format!("{:?}", state)),
            }),
        }
    }

    /// Wait for the configured readiness signal with the navigation timeout
    pub async fn wait_for_page_load(&self) -> PageResult<()> {
        self.wait_for_load_state(self.config.readiness, self.config.timeouts.navigation())
            .await
    }

    pub async fn title(&self) -> PageResult<String> {
        self.handle
            .title()
            .await
            .map_err(|e| PageError::query("get page title", e))
    }

    /// Current URL, or an empty string once the handle is gone
    pub async fn current_url(&self) -> String {
        match self.handle.current_url().await {
            Ok(url) => url,
            Err(e) => {
                debug!("Could not read current URL: {}", e);
                String::new()
            }
        }
    }

    /// Look for a visible match for up to `within`, checking at least once.
    /// A single check may run for the action timeout even past `within`.
    pub async fn probe(&self, locator: &Locator, within: Duration) -> Presence {
        let started = Instant::now();
        let check_cap = self.config.timeouts.action().max(POLL_INTERVAL);
        loop {
            let remaining = within.saturating_sub(started.elapsed()).max(check_cap);
            match tokio::time::timeout(remaining, self.handle.is_visible(locator)).await {
                Ok(Ok(true)) => return Presence::Found,
                Ok(Ok(false)) => {}
                Ok(Err(e)) if e.is_closed() => return Presence::NotFound,
                Ok(Err(e)) => debug!("Visibility check for {} failed: {}", locator, e),
                Err(_) => debug!("Visibility check for {} did not answer", locator),
            }
            if started.elapsed() >= within {
                return Presence::NotFound;
            }
            tokio::time::sleep(POLL_INTERVAL.min(within.saturating_sub(started.elapsed())))
                .await;
        }
    }

    /// Never fails; absence within the visibility window is `false`
    pub async fn is_element_visible(&self, locator: &Locator) -> bool {
        self.probe(locator, self.config.timeouts.visibility())
            .await
            .is_found()
    }

    /// Suspend until `locator` is visible or `timeout` passes
    pub async fn wait_for_element(&self, locator: &Locator, timeout: Duration) -> PageResult<()> {
        let started = Instant::now();
        match self.probe(locator, timeout).await {
            Presence::Found => Ok(()),
            Presence::NotFound => Err(PageError::Timeout {
                target: locator.to_string(),
                elapsed_ms: started.elapsed().as_millis() as u64,
            }),
        }
    }

    /// Poll the URL until `predicate` holds
    pub async fn wait_for_url<F>(
        &self,
        description: &str,
        timeout: Duration,
        predicate: F,
    ) -> PageResult<String>
    where
        F: Fn(&str) -> bool,
    {
        let started = Instant::now();
        loop {
            let url = self.current_url().await;
            if predicate(&url) {
                return Ok(url);
            }
            if started.elapsed() >= timeout {
                return Err(PageError::Timeout {
                    target: format!("URL {} (last: {})", description, url),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Capture the page to `<screenshot_dir>/<name>.png`. Failures are logged
    /// and swallowed so they never mask the scenario's own outcome.
    pub async fn take_screenshot(&self, name: &str) -> Option<PathBuf> {
        let path = self.screenshot_path(name);
        let bytes = match self.handle.screenshot().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to take screenshot {}: {}", name, e);
                return None;
            }
        };

        if let Some(parent) = path.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            warn!("Failed to create screenshot directory {}: {}", parent.display(), e);
            return None;
        }

        match tokio::fs::write(&path, &bytes).await {
            Ok(()) => {
                info!("Screenshot saved to: {} ({} bytes)", path.display(), bytes.len());
                Some(path)
            }
            Err(e) => {
                warn!("Failed to write screenshot {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        let file_name = if self.config.timestamp_screenshots {
            format!("{}_{}.png", name, chrono::Local::now().format("%Y%m%d_%H%M%S"))
        } else {
            format!("{}.png", name)
        };
        self.config.screenshot_dir.join(file_name)
    }

    /// Fail with a timeout unless `locator` becomes visible within the action timeout
    pub async fn expect_visible(&self, locator: &Locator) -> PageResult<()> {
        self.wait_for_element(locator, self.config.timeouts.action())
            .await
    }

    /// Fail unless `locator` stays absent
    pub async fn expect_hidden(&self, locator: &Locator) -> PageResult<()> {
        if self.is_element_visible(locator).await {
            return Err(PageError::expectation(locator, "to be hidden", "visible"));
        }
        Ok(())
    }

    pub async fn text(&self, locator: &Locator) -> PageResult<String> {
        self.handle
            .text_content(locator)
            .await
            .map(|t| t.trim().to_string())
            .map_err(|e| PageError::query(format!("read text of {}", locator.name()), e))
    }

    pub async fn expect_text_contains(&self, locator: &Locator, expected: &str) -> PageResult<()> {
        self.expect_visible(locator).await?;
        let actual = self.text(locator).await?;
        if !actual.contains(expected) {
            return Err(PageError::expectation(
                locator,
                format!("to contain {:?}", expected),
                format!("{:?}", actual),
            ));
        }
        Ok(())
    }

    pub async fn attribute(&self, locator: &Locator, name: &str) -> PageResult<Option<String>> {
        self.handle
            .attribute(locator, name)
            .await
            .map_err(|e| PageError::query(format!("read {} of {}", name, locator.name()), e))
    }

    /// `expected = None` only checks that the attribute is present
    pub async fn expect_attribute(
        &self,
        locator: &Locator,
        name: &str,
        expected: Option<&str>,
    ) -> PageResult<()> {
        let actual = self.attribute(locator, name).await?;
        match (expected, actual.as_deref()) {
            (None, Some(_)) => Ok(()),
            (Some(want), Some(got)) if want == got => Ok(()),
            (want, got) => Err(PageError::expectation(
                locator,
                format!("attribute {}={:?}", name, want.unwrap_or("<present>")),
                format!("{:?}", got),
            )),
        }
    }

    /// Whether the element's class attribute contains any of `tokens`
    pub async fn has_class_token(&self, locator: &Locator, tokens: &[String]) -> PageResult<bool> {
        let classes = self.attribute(locator, "class").await?.unwrap_or_default();
        Ok(tokens.iter().any(|token| classes.contains(token.as_str())))
    }

    pub async fn input_value(&self, locator: &Locator) -> PageResult<String> {
        self.handle
            .input_value(locator)
            .await
            .map_err(|e| PageError::query(format!("read value of {}", locator.name()), e))
    }

    pub async fn is_enabled(&self, locator: &Locator) -> PageResult<bool> {
        self.handle
            .is_enabled(locator)
            .await
            .map_err(|e| PageError::query(format!("check {} enabled", locator.name()), e))
    }

    /// Fill a visible control and make sure it reads back exactly `value`
    pub async fn fill_checked(&self, locator: &Locator, value: &str) -> PageResult<()> {
        self.require_visible(locator).await?;
        self.handle
            .fill(locator, value)
            .await
            .map_err(|e| action_error(locator, e))?;

        let actual = self.input_value(locator).await?;
        if actual != value {
            return Err(PageError::expectation(
                locator,
                format!("value {:?}", value),
                format!("{:?}", actual),
            ));
        }
        Ok(())
    }

    /// Click a control that must be visible and enabled
    pub async fn click_checked(&self, locator: &Locator) -> PageResult<()> {
        self.require_visible(locator).await?;
        if !self.is_enabled(locator).await? {
            return Err(PageError::precondition(locator, "control is disabled"));
        }
        self.handle
            .click(locator)
            .await
            .map_err(|e| action_error(locator, e))
    }

    /// Click something that only needs to be visible (links, checkboxes)
    pub async fn click_visible(&self, locator: &Locator) -> PageResult<()> {
        self.require_visible(locator).await?;
        self.handle
            .click(locator)
            .await
            .map_err(|e| action_error(locator, e))
    }

    pub async fn clear(&self, locator: &Locator) -> PageResult<()> {
        self.require_visible(locator).await?;
        self.handle
            .clear(locator)
            .await
            .map_err(|e| action_error(locator, e))
    }

    pub async fn press(&self, locator: &Locator, key: &str) -> PageResult<()> {
        self.require_visible(locator).await?;
        self.handle
            .press(locator, key)
            .await
            .map_err(|e| action_error(locator, e))
    }

    async fn require_visible(&self, locator: &Locator) -> PageResult<()> {
        match self.probe(locator, self.config.timeouts.action()).await {
            Presence::Found => Ok(()),
            Presence::NotFound => Err(PageError::precondition(locator, "control is not visible")),
        }
    }
}

fn action_error(locator: &Locator, err: HandleError) -> PageError {
    match err {
        HandleError::NoSuchElement(_) => PageError::precondition(locator, "control disappeared"),
        HandleError::NotInteractable(_) => {
            PageError::precondition(locator, "control is not interactable")
        }
        other => PageError::query(format!("act on {}", locator.name()), other),
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;
