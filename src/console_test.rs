// Unit tests for console capture

use super::*;
use crate::mock::MockPage;

fn message(level: &str, text: &str) -> ConsoleMessage {
    ConsoleMessage {
        level: level.to_string(),
        message: text.to_string(),
        timestamp: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

#[test]
fn test_capture_script_uses_shared_buffer() {
    assert!(CAPTURE_SCRIPT.contains("window.__pagewright_console_logs"));
    assert!(READ_SCRIPT.contains("window.__pagewright_console_logs"));
}

#[tokio::test]
async fn test_messages_and_errors() {
    let page = MockPage::new();
    page.state().console = vec![
        message("log", "ready"),
        message("error", "Uncaught TypeError"),
        message("warn", "deprecated"),
    ];

    assert_eq!(messages(&page).await.len(), 3);
    let errors = errors(&page).await;
    assert_eq!(errors, vec![message("error", "Uncaught TypeError")]);
}

#[tokio::test]
async fn test_closed_page_yields_nothing() {
    let page = MockPage::new();
    page.state().console = vec![message("error", "boom")];
    page.close();
    assert!(messages(&page).await.is_empty());
}
