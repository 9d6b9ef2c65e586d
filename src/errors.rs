use thiserror::Error;

/// Failure reported by a [`PageHandle`](crate::handle::PageHandle) primitive
#[derive(Debug, Error)]
pub enum HandleError {
    /// The browser tab or session is gone
    #[error("page handle is closed")]
    Closed,
    /// No element matched the locator
    #[error("no element matches {0}")]
    NoSuchElement(String),
    /// Element exists but cannot take input (disabled, covered, read-only)
    #[error("element {0} is not interactable")]
    NotInteractable(String),
    /// Navigation target could not be loaded
    #[error("cannot reach {url}: {message}")]
    Unreachable { url: String, message: String },
    /// A driver-side wait expired
    #[error("timed out waiting for {0}")]
    Timeout(String),
    /// In-page script failed or returned something unexpected
    #[error("script error: {0}")]
    Script(String),
    /// Any other WebDriver command failure
    #[error("WebDriver command failed: {0}")]
    Driver(#[from] fantoccini::error::CmdError),
}

impl HandleError {
    /// True when the handle can no longer be driven
    pub fn is_closed(&self) -> bool {
        match self {
            HandleError::Closed => true,
            HandleError::Driver(err) => {
                let msg = err.to_string().to_lowercase();
                msg.contains("invalid session id")
                    || msg.contains("no such window")
                    || msg.contains("session deleted")
            }
            _ => false,
        }
    }
}

/// Coarse classification of [`PageError`], handy for assertions in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Navigation,
    Timeout,
    Precondition,
    Query,
    Expectation,
}

/// Errors surfaced by page objects to the calling scenario
#[derive(Debug, Error)]
pub enum PageError {
    /// Target unreachable, or readiness not reached in time
    #[error("Failed to navigate to {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: HandleError,
    },
    /// An explicit wait ran out
    #[error("Timed out after {elapsed_ms}ms waiting for {target}")]
    Timeout { target: String, elapsed_ms: u64 },
    /// Action attempted on a control that is not actionable
    #[error("Cannot act on {locator}: {reason}")]
    Precondition { locator: String, reason: String },
    /// Introspection against a closed or invalid handle
    #[error("Failed to {operation}: {source}")]
    Query {
        operation: String,
        #[source]
        source: HandleError,
    },
    /// A verify-style check observed something else
    #[error("Expected {target} {expected}, found {actual}")]
    Expectation {
        target: String,
        expected: String,
        actual: String,
    },
}

impl PageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PageError::Navigation { .. } => ErrorKind::Navigation,
            PageError::Timeout { .. } => ErrorKind::Timeout,
            PageError::Precondition { .. } => ErrorKind::Precondition,
            PageError::Query { .. } => ErrorKind::Query,
            PageError::Expectation { .. } => ErrorKind::Expectation,
        }
    }

    pub(crate) fn query(operation: impl Into<String>, source: HandleError) -> Self {
        PageError::Query {
            operation: operation.into(),
            source,
        }
    }

    pub(crate) fn precondition(locator: impl ToString, reason: impl Into<String>) -> Self {
        PageError::Precondition {
            locator: locator.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn expectation(
        target: impl ToString,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        PageError::Expectation {
            target: target.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

pub type PageResult<T> = std::result::Result<T, PageError>;

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
