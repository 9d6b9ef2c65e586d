// Unit tests for the generic page object

use super::*;
use crate::config::Timeouts;
use crate::errors::ErrorKind;
use crate::mock::{MockElement, MockPage};

fn fast_config() -> SuiteConfig {
    SuiteConfig {
        timeouts: Timeouts {
            navigation_ms: 300,
            action_ms: 200,
            visibility_ms: 0,
            error_probe_ms: 100,
        },
        ..SuiteConfig::default()
    }
}

fn install(page: &MockPage, config: &SuiteConfig) {
    let generic = GenericPage::new(page, config);
    page.route("http://localhost:3000/sample", "Sample Page");
    page.add(generic.heading(), MockElement::new().with_text(" Sample Page "));
    page.add(generic.main_content(), MockElement::new());
    page.add(&Locator::css("nav", "nav"), MockElement::new());
}

#[tokio::test]
async fn test_navigate_to_explicit_url() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let generic = GenericPage::new(&page, &config);

    generic.navigate(Some("/sample")).await.unwrap();
    assert_eq!(generic.current_url().await, "http://localhost:3000/sample");
    assert_eq!(generic.page_title().await.unwrap(), "Sample Page");
    assert_eq!(generic.heading_text().await.as_deref(), Some("Sample Page"));

    generic.navigate(None).await.unwrap();
    assert_eq!(generic.current_url().await, "http://localhost:3000/");
}

#[tokio::test]
async fn test_landmarks() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let generic = GenericPage::new(&page, &config);

    generic.verify_page_loaded().await.unwrap();
    assert!(generic.is_navigation_visible().await);
    // No footer registered
    assert!(!generic.is_footer_visible().await);
}

#[tokio::test]
async fn test_missing_main_content() {
    let config = fast_config();
    let page = MockPage::new();
    let generic = GenericPage::new(&page, &config);

    let err = generic.verify_page_loaded().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(generic.heading_text().await, None);
}

#[tokio::test]
async fn test_is_page_loaded() {
    let config = fast_config();
    let page = MockPage::new();
    let generic = GenericPage::with_config(
        &page,
        &config,
        GenericConfig {
            loaded_timeout_ms: 100,
            ..GenericConfig::default()
        },
    );

    assert!(generic.is_page_loaded().await);
    generic.wait_for_page_ready().await.unwrap();

    page.state().never_ready = true;
    assert!(!generic.is_page_loaded().await);
}

#[tokio::test]
async fn test_closed_page() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let generic = GenericPage::new(&page, &config);
    page.close();

    assert!(!generic.is_page_loaded().await);
    assert!(!generic.is_navigation_visible().await);
    assert_eq!(generic.current_url().await, "");
    assert_eq!(generic.page_title().await.unwrap_err().kind(), ErrorKind::Query);
}
