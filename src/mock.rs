//! In-memory [`PageHandle`] for unit tests.
//!
//! Elements are registered against the query a locator compiles to, so two
//! locators that would hit the same DOM node share one [`MockElement`].
//! Click reactions let a test script what the page does in response, which is
//! enough to exercise every page object without a browser.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::HandleError;
use crate::handle::{HandleResult, PageHandle};
use crate::locator::{Locator, Query};
use crate::types::{ConsoleMessage, LoadState, ViewportSize};

type Reaction = Arc<dyn Fn(&mut MockState) + Send + Sync>;

/// One fake DOM element
#[derive(Debug, Clone, PartialEq)]
pub struct MockElement {
    pub visible: bool,
    pub enabled: bool,
    pub checked: bool,
    pub value: String,
    pub text: String,
    pub attributes: HashMap<String, String>,
    /// Not visible before this instant even when `visible` is set
    pub visible_from: Option<Instant>,
}

impl Default for MockElement {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
            checked: false,
            value: String::new(),
            text: String::new(),
            attributes: HashMap::new(),
            visible_from: None,
        }
    }
}

impl MockElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Becomes visible only after `delay`
    pub fn appearing_after(mut self, delay: Duration) -> Self {
        self.visible_from = Some(Instant::now() + delay);
        self
    }

    fn is_visible_now(&self) -> bool {
        self.visible && self.visible_from.is_none_or(|from| Instant::now() >= from)
    }
}

/// Mutable page state; reactions receive it to simulate the page's scripts
#[derive(Default)]
pub struct MockState {
    pub url: String,
    pub title: String,
    pub closed: bool,
    /// Document never reaches its readiness signal
    pub never_ready: bool,
    pub fail_screenshots: bool,
    /// Added to every visibility check, like a slow driver round trip
    pub visibility_latency: Duration,
    pub viewport: Option<ViewportSize>,
    pub console: Vec<ConsoleMessage>,
    elements: HashMap<Query, MockElement>,
    titles: HashMap<String, String>,
    unreachable: HashSet<String>,
    history: Vec<String>,
}

impl MockState {
    pub fn element(&self, locator: &Locator) -> Option<&MockElement> {
        self.elements.get(&locator.query())
    }

    pub fn element_mut(&mut self, locator: &Locator) -> Option<&mut MockElement> {
        self.elements.get_mut(&locator.query())
    }

    pub fn insert(&mut self, locator: &Locator, element: MockElement) {
        self.elements.insert(locator.query(), element);
    }

    pub fn remove(&mut self, locator: &Locator) {
        self.elements.remove(&locator.query());
    }

    /// Pretend the page navigated somewhere else
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        if let Some(title) = self.titles.get(&self.url) {
            self.title = title.clone();
        }
    }
}

/// Scriptable fake page
#[derive(Default, Clone)]
pub struct MockPage {
    state: Arc<Mutex<MockState>>,
    reactions: Arc<Mutex<HashMap<Query, Vec<Reaction>>>>,
}

impl MockPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add(&self, locator: &Locator, element: MockElement) -> &Self {
        self.state().insert(locator, element);
        self
    }

    /// Title served once `url` is loaded
    pub fn route(&self, url: impl Into<String>, title: impl Into<String>) -> &Self {
        self.state().titles.insert(url.into(), title.into());
        self
    }

    pub fn unreachable(&self, url: impl Into<String>) -> &Self {
        self.state().unreachable.insert(url.into());
        self
    }

    /// Run `reaction` every time `locator` is clicked or pressed
    pub fn on_click<F>(&self, locator: &Locator, reaction: F) -> &Self
    where
        F: Fn(&mut MockState) + Send + Sync + 'static,
    {
        self.reactions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(locator.query())
            .or_default()
            .push(Arc::new(reaction));
        self
    }

    pub fn close(&self) {
        self.state().closed = true;
    }

    /// Calls made so far, e.g. `"fill:email input=8148438075"`
    pub fn history(&self) -> Vec<String> {
        self.state().history.clone()
    }

    pub fn was_called(&self, prefix: &str) -> bool {
        self.state().history.iter().any(|c| c.starts_with(prefix))
    }

    fn open(&self, call: String) -> HandleResult<MutexGuard<'_, MockState>> {
        let mut state = self.state();
        if state.closed {
            return Err(HandleError::Closed);
        }
        state.history.push(call);
        Ok(state)
    }

    fn react(&self, locator: &Locator) {
        let reactions = self
            .reactions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&locator.query())
            .cloned()
            .unwrap_or_default();
        let mut state = self.state();
        for reaction in reactions {
            reaction(&mut state);
        }
    }
}

fn lookup<'s>(state: &'s MockState, locator: &Locator) -> HandleResult<&'s MockElement> {
    state
        .element(locator)
        .ok_or_else(|| HandleError::NoSuchElement(locator.to_string()))
}

fn lookup_mut<'s>(
    state: &'s mut MockState,
    locator: &Locator,
) -> HandleResult<&'s mut MockElement> {
    state
        .element_mut(locator)
        .ok_or_else(|| HandleError::NoSuchElement(locator.to_string()))
}

fn interactable<'s>(
    state: &'s mut MockState,
    locator: &Locator,
) -> HandleResult<&'s mut MockElement> {
    let element = lookup_mut(state, locator)?;
    if !element.is_visible_now() || !element.enabled {
        return Err(HandleError::NotInteractable(locator.to_string()));
    }
    Ok(element)
}

#[async_trait]
impl PageHandle for MockPage {
    async fn goto(&self, url: &str) -> HandleResult<()> {
        let mut state = self.open(format!("goto:{url}"))?;
        if state.unreachable.contains(url) {
            return Err(HandleError::Unreachable {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        state.set_url(url);
        Ok(())
    }

    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> HandleResult<()> {
        let never_ready = self.open(format!("wait_for_load_state:{state:?}"))?.never_ready;
        if never_ready {
            tokio::time::sleep(timeout).await;
            return Err(HandleError::Timeout(format!("load state {:?}", state)));
        }
        Ok(())
    }

    async fn title(&self) -> HandleResult<String> {
        Ok(self.open("title".to_string())?.title.clone())
    }

    async fn current_url(&self) -> HandleResult<String> {
        Ok(self.open("current_url".to_string())?.url.clone())
    }

    async fn count(&self, locator: &Locator) -> HandleResult<usize> {
        let state = self.open(format!("count:{}", locator.name()))?;
        Ok(usize::from(state.element(locator).is_some()))
    }

    async fn is_visible(&self, locator: &Locator) -> HandleResult<bool> {
        let latency = self.state().visibility_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let state = self.open(format!("is_visible:{}", locator.name()))?;
        Ok(state
            .element(locator)
            .is_some_and(MockElement::is_visible_now))
    }

    async fn is_enabled(&self, locator: &Locator) -> HandleResult<bool> {
        let state = self.open(format!("is_enabled:{}", locator.name()))?;
        Ok(lookup(&state, locator)?.enabled)
    }

    async fn is_checked(&self, locator: &Locator) -> HandleResult<bool> {
        let state = self.open(format!("is_checked:{}", locator.name()))?;
        Ok(lookup(&state, locator)?.checked)
    }

    async fn text_content(&self, locator: &Locator) -> HandleResult<String> {
        let state = self.open(format!("text_content:{}", locator.name()))?;
        Ok(lookup(&state, locator)?.text.clone())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> HandleResult<Option<String>> {
        let state = self.open(format!("attribute:{}.{}", locator.name(), name))?;
        Ok(lookup(&state, locator)?.attributes.get(name).cloned())
    }

    async fn input_value(&self, locator: &Locator) -> HandleResult<String> {
        let state = self.open(format!("input_value:{}", locator.name()))?;
        Ok(lookup(&state, locator)?.value.clone())
    }

    async fn click(&self, locator: &Locator) -> HandleResult<()> {
        {
            let mut state = self.open(format!("click:{}", locator.name()))?;
            let element = interactable(&mut state, locator)?;
            if element.attributes.get("type").map(String::as_str) == Some("checkbox") {
                element.checked = !element.checked;
            }
        }
        self.react(locator);
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> HandleResult<()> {
        let mut state = self.open(format!("fill:{}={}", locator.name(), value))?;
        interactable(&mut state, locator)?.value = value.to_string();
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> HandleResult<()> {
        let mut state = self.open(format!("clear:{}", locator.name()))?;
        interactable(&mut state, locator)?.value.clear();
        Ok(())
    }

    async fn press(&self, locator: &Locator, key: &str) -> HandleResult<()> {
        {
            let mut state = self.open(format!("press:{}={}", locator.name(), key))?;
            interactable(&mut state, locator)?;
        }
        self.react(locator);
        Ok(())
    }

    async fn set_viewport(&self, viewport: ViewportSize) -> HandleResult<()> {
        self.open(format!("set_viewport:{viewport}"))?.viewport = Some(viewport);
        Ok(())
    }

    async fn screenshot(&self) -> HandleResult<Vec<u8>> {
        let state = self.open("screenshot".to_string())?;
        if state.fail_screenshots {
            return Err(HandleError::Script("screenshot not supported".to_string()));
        }
        // PNG signature is enough for anything that sniffs the file
        Ok(vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'])
    }

    async fn evaluate(
        &self,
        script: &str,
        _args: Vec<serde_json::Value>,
    ) -> HandleResult<serde_json::Value> {
        let state = self.open("evaluate".to_string())?;
        if script.contains("__pagewright_console_logs") {
            return serde_json::to_value(&state.console)
                .map_err(|e| HandleError::Script(e.to_string()));
        }
        if script.contains("document.readyState") {
            return Ok(serde_json::Value::String("complete".to_string()));
        }
        Ok(serde_json::Value::Null)
    }
}

#[cfg(test)]
#[path = "mock_test.rs"]
mod mock_test;
