//! # pagewright
#![allow(clippy::uninlined_format_args)]
//!
//! Page objects for browser end-to-end suites, driven over WebDriver.
//!
//! Every screen under test gets a page object that owns its locators and
//! exposes intent-level actions (`perform_login`, `click_get_otp`) and
//! checks (`verify_page_elements`). Page objects borrow a [`PageHandle`],
//! so they never outlive the browser tab they drive.
//!
//! ## Running against a browser
//!
//! A WebDriver (geckodriver or chromedriver) is started automatically when
//! one is not already listening on its standard port.
//!
//! ```no_run
//! use pagewright::{GrcPage, SuiteConfig, WebDriverPage};
//!
//! # async fn example() -> anyhow::Result<()> {
//! pagewright::logging::init();
//! let config = SuiteConfig::load()?;
//! let page = WebDriverPage::connect(&config).await?;
//!
//! let grc = GrcPage::new(&page, &config);
//! grc.navigate().await?;
//! grc.perform_login("8148438075").await?;
//! assert!(!grc.is_error_message_displayed().await);
//!
//! page.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`SuiteConfig::load`] starts from defaults, reads the JSON file named by
//! `PAGEWRIGHT_CONFIG` if set, then applies `PAGEWRIGHT_*` overrides:
//!
//! ```bash
//! PAGEWRIGHT_BASE_URL=https://staging.example.com \
//! PAGEWRIGHT_BROWSER=chrome \
//! PAGEWRIGHT_VIEWPORT=375x667 \
//! cargo test
//! ```
//!
//! ## Without a browser
//!
//! [`mock::MockPage`] implements [`PageHandle`] in memory, which is how the
//! page objects themselves are unit tested.

/// Suite configuration and environment overrides
pub mod config;

/// Opt-in console capture
pub mod console;

/// Error taxonomy for handles and page objects
pub mod errors;

/// Test data fixtures
pub mod fixtures;

/// The browser primitives page objects are written against
pub mod handle;

/// Element locators
pub mod locator;

/// Tracing setup
pub mod logging;

pub mod mock;

/// Shared page object behavior
pub mod page;

/// Concrete page objects
pub mod pages;

/// Shared value types
pub mod types;

/// WebDriver-backed page handle
pub mod webdriver;

/// Automatic WebDriver process management
pub mod webdriver_manager;

pub use config::{SuiteConfig, Timeouts};
pub use errors::{ErrorKind, HandleError, PageError, PageResult};
pub use handle::PageHandle;
pub use locator::Locator;
pub use page::BasePage;
pub use pages::{Field, GenericPage, GrcPage, HomePage, LoginPage};
pub use types::{ConsoleMessage, LoadState, Presence, ViewportSize};
pub use webdriver::{BrowserType, WebDriverPage};
