use async_trait::async_trait;
use std::time::Duration;

use crate::errors::HandleError;
use crate::locator::Locator;
use crate::types::{LoadState, ViewportSize};

pub type HandleResult<T> = std::result::Result<T, HandleError>;

/// Capability representing one browser tab.
///
/// The page-object layer only ever borrows a handle; whoever opened the tab
/// owns it and closes it. Element-level methods resolve the locator on every
/// call, so a stale DOM never leaks into a page object.
///
/// Implementations:
///
/// - [`WebDriverPage`](crate::webdriver::WebDriverPage) - real browser over fantoccini
/// - [`MockPage`](crate::mock::MockPage) - in-memory page for unit tests
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Start loading `url`. Does not wait for readiness.
    async fn goto(&self, url: &str) -> HandleResult<()>;

    /// Block until `state` is reached or `timeout` elapses
    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> HandleResult<()>;

    async fn title(&self) -> HandleResult<String>;

    async fn current_url(&self) -> HandleResult<String>;

    /// Number of elements currently matching the locator
    async fn count(&self, locator: &Locator) -> HandleResult<usize>;

    /// `Ok(false)` when nothing matches
    async fn is_visible(&self, locator: &Locator) -> HandleResult<bool>;

    async fn is_enabled(&self, locator: &Locator) -> HandleResult<bool>;

    async fn is_checked(&self, locator: &Locator) -> HandleResult<bool>;

    async fn text_content(&self, locator: &Locator) -> HandleResult<String>;

    async fn attribute(&self, locator: &Locator, name: &str) -> HandleResult<Option<String>>;

    async fn input_value(&self, locator: &Locator) -> HandleResult<String>;

    async fn click(&self, locator: &Locator) -> HandleResult<()>;

    /// Replace the control's value with `value`
    async fn fill(&self, locator: &Locator, value: &str) -> HandleResult<()>;

    async fn clear(&self, locator: &Locator) -> HandleResult<()>;

    /// Press a named key (`Enter`, `Tab`, `Escape`, ...) on the element
    async fn press(&self, locator: &Locator, key: &str) -> HandleResult<()>;

    async fn set_viewport(&self, viewport: ViewportSize) -> HandleResult<()>;

    /// Full-page PNG bytes
    async fn screenshot(&self) -> HandleResult<Vec<u8>>;

    /// Run a script in the page. `arguments[i]` inside the script maps to `args[i]`.
    async fn evaluate(
        &self,
        script: &str,
        args: Vec<serde_json::Value>,
    ) -> HandleResult<serde_json::Value>;
}
