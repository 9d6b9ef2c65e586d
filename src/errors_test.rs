// Unit tests for the error taxonomy

use super::*;

#[test]
fn test_page_error_kinds() {
    let navigation = PageError::Navigation {
        url: "http://localhost:1/".to_string(),
        source: HandleError::Unreachable {
            url: "http://localhost:1/".to_string(),
            message: "connection refused".to_string(),
        },
    };
    assert_eq!(navigation.kind(), ErrorKind::Navigation);

    let timeout = PageError::Timeout {
        target: "email input".to_string(),
        elapsed_ms: 1000,
    };
    assert_eq!(timeout.kind(), ErrorKind::Timeout);

    assert_eq!(
        PageError::precondition("get otp button", "control is disabled").kind(),
        ErrorKind::Precondition
    );
    assert_eq!(
        PageError::query("get page title", HandleError::Closed).kind(),
        ErrorKind::Query
    );
    assert_eq!(
        PageError::expectation("error message", "to be visible", "nothing").kind(),
        ErrorKind::Expectation
    );
}

#[test]
fn test_error_messages() {
    let err = PageError::Navigation {
        url: "http://localhost:1/".to_string(),
        source: HandleError::Unreachable {
            url: "http://localhost:1/".to_string(),
            message: "connection refused".to_string(),
        },
    };
    assert_eq!(
        err.to_string(),
        "Failed to navigate to http://localhost:1/: cannot reach http://localhost:1/: connection refused"
    );

    let err = PageError::Timeout {
        target: "spinner".to_string(),
        elapsed_ms: 250,
    };
    assert_eq!(err.to_string(), "Timed out after 250ms waiting for spinner");

    let err = PageError::query("get page title", HandleError::Closed);
    assert_eq!(err.to_string(), "Failed to get page title: page handle is closed");

    let err = PageError::expectation("error message", "to contain \"required\"", "\"\"");
    assert_eq!(
        err.to_string(),
        "Expected error message to contain \"required\", found \"\""
    );
}

#[test]
fn test_error_source_chain() {
    use std::error::Error;

    let err = PageError::query("read text", HandleError::NoSuchElement("footer".to_string()));
    let source = err.source().expect("query errors keep their cause");
    assert_eq!(source.to_string(), "no element matches footer");

    let err = PageError::precondition("button", "control is disabled");
    assert!(err.source().is_none());
}

#[test]
fn test_handle_error_is_closed() {
    assert!(HandleError::Closed.is_closed());
    assert!(!HandleError::NoSuchElement("x".to_string()).is_closed());
    assert!(!HandleError::Timeout("load".to_string()).is_closed());
    assert!(!HandleError::Script("boom".to_string()).is_closed());
}
