use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Readiness signal a navigation waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// `document.readyState === 'complete'`
    Load,
    /// `document.readyState` is `interactive` or `complete`
    DomContentLoaded,
    /// Load complete and no new resource requests for a quiet window
    #[default]
    NetworkIdle,
}

impl std::str::FromStr for LoadState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "load" => Ok(LoadState::Load),
            "domcontentloaded" => Ok(LoadState::DomContentLoaded),
            "networkidle" => Ok(LoadState::NetworkIdle),
            _ => anyhow::bail!("Unsupported load state: {}", s),
        }
    }
}

/// Browser viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl ViewportSize {
    pub const DESKTOP: ViewportSize = ViewportSize::new(1920, 1080);
    pub const TABLET: ViewportSize = ViewportSize::new(768, 1024);
    pub const MOBILE: ViewportSize = ViewportSize::new(375, 667);

    pub const fn new(width: u32, height: u32) -> Self {
        ViewportSize { width, height }
    }

    /// Parse viewport size from "WIDTHxHEIGHT" format (e.g., "1920x1080")
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('x').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid viewport format. Use WIDTHxHEIGHT (e.g., 1920x1080)");
        }

        let width = parts[0]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid width in viewport size"))?;
        let height = parts[1]
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid height in viewport size"))?;

        Ok(ViewportSize { width, height })
    }
}

impl std::fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Console message captured from the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Log level (log, warn, error, info)
    pub level: String,
    /// The console message text
    pub message: String,
    /// Timestamp when the message was logged
    pub timestamp: String,
}

/// Outcome of a bounded element lookup.
///
/// Absence is an ordinary answer, so visibility probes return this instead
/// of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    NotFound,
}

impl Presence {
    pub fn is_found(self) -> bool {
        matches!(self, Presence::Found)
    }
}

impl From<bool> for Presence {
    fn from(found: bool) -> Self {
        if found {
            Presence::Found
        } else {
            Presence::NotFound
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
