// Unit tests for the login page object

use super::*;
use crate::config::Timeouts;
use crate::errors::ErrorKind;
use crate::fixtures::LoginData;
use crate::mock::{MockElement, MockPage, MockState};

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

fn fast_login_config() -> LoginConfig {
    LoginConfig {
        redirect_timeout_ms: 500,
        ..LoginConfig::default()
    }
}

fn install(page: &MockPage, config: &SuiteConfig) {
    let login = LoginPage::new(page, config);
    page.route("http://localhost:3000/login", "Login");
    page.add(login.page_title(), MockElement::new().with_text("Sign In"));
    page.add(login.login_form(), MockElement::new());
    page.add(
        login.email_input(),
        MockElement::new().with_attr("type", "email").with_attr("required", ""),
    );
    page.add(
        login.password_input(),
        MockElement::new().with_attr("type", "password").with_attr("required", ""),
    );
    page.add(
        login.remember_me_checkbox(),
        MockElement::new().with_attr("type", "checkbox"),
    );
    page.add(login.login_button(), MockElement::new().with_text("Sign In"));
    page.add(
        login.forgot_password_link(),
        MockElement::new().with_attr("href", "/forgot-password"),
    );
    page.add(login.signup_link(), MockElement::new().with_attr("href", "/signup"));

    let valid = LoginData::default().valid_user;
    let email = login.email_input().clone();
    let password = login.password_input().clone();
    let error = login.error_message_region().clone();
    page.on_click(login.login_button(), move |state: &mut MockState| {
        let value = |l: &Locator| state.element(l).map(|e| e.value.clone()).unwrap_or_default();
        if value(&email) == valid.email && value(&password) == valid.password {
            state.remove(&error);
            state.set_url("http://localhost:3000/dashboard");
        } else {
            state.insert(
                &error,
                MockElement::new().with_text("Invalid email or password"),
            );
        }
    });
    page.on_click(login.signup_link(), |state| {
        state.set_url("http://localhost:3000/signup")
    });
}

#[tokio::test]
async fn test_navigate_and_form_displayed() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::new(&page, &config);

    login.navigate().await.unwrap();
    assert_eq!(login.base().title().await.unwrap(), "Login");
    login.verify_login_form_displayed().await.unwrap();
    login.verify_no_error_message().await.unwrap();
}

#[tokio::test]
async fn test_successful_login_redirects() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::with_config(&page, &config, fast_login_config());
    let user = LoginData::default().valid_user;

    login.navigate().await.unwrap();
    login.login(&user.email, &user.password, false).await.unwrap();

    let url = login.wait_for_successful_login().await.unwrap();
    assert_eq!(url, "http://localhost:3000/dashboard");
    assert!(!login.is_error_message_displayed().await);
}

#[tokio::test]
async fn test_invalid_credentials_show_error() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::with_config(&page, &config, fast_login_config());

    for creds in LoginData::default().invalid_credentials {
        login.clear_form().await.unwrap();
        login.login(&creds.email, &creds.password, false).await.unwrap();
        login.verify_error_message(None).await.unwrap();
        assert_eq!(
            login.error_message().await.as_deref(),
            Some("Invalid email or password")
        );
    }

    let err = login.wait_for_successful_login().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(
        login.verify_no_error_message().await.unwrap_err().kind(),
        ErrorKind::Expectation
    );
}

#[tokio::test]
async fn test_wrong_error_text() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::new(&page, &config);

    login.login("user@example.com", "wrong", false).await.unwrap();
    let err = login
        .verify_error_message(Some("Account locked"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Expectation);
}

#[tokio::test]
async fn test_empty_values_are_not_typed() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::new(&page, &config);

    login.login("", "Password123!", false).await.unwrap();
    assert!(!page.was_called("fill:email input"));
    assert!(page.was_called("fill:password input=Password123!"));
    assert_eq!(login.field_value(Field::Email).await.unwrap(), "");
    assert!(login.is_error_message_displayed().await);
}

#[tokio::test]
async fn test_remember_me() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::new(&page, &config);

    assert!(!login.is_remember_me_checked().await.unwrap());
    login.toggle_remember_me().await.unwrap();
    assert!(login.is_remember_me_checked().await.unwrap());

    login.login("user@example.com", "wrong", true).await.unwrap();
    assert!(!login.is_remember_me_checked().await.unwrap());
}

#[tokio::test]
async fn test_links() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::new(&page, &config);

    login.verify_forgot_password_link().await.unwrap();
    login.verify_sign_up_link().await.unwrap();

    login.click_sign_up().await.unwrap();
    assert_eq!(login.base().current_url().await, "http://localhost:3000/signup");

    login.click_forgot_password().await.unwrap();
    assert!(page.was_called("click:forgot password link"));
}

#[tokio::test]
async fn test_required_fields() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::new(&page, &config);

    login.verify_required_field(Field::Email).await.unwrap();
    login.verify_required_field(Field::Password).await.unwrap();

    page.state()
        .element_mut(login.password_input())
        .unwrap()
        .attributes
        .remove("required");
    let err = login.verify_required_field(Field::Password).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Expectation);
}

#[tokio::test]
async fn test_clear_form() {
    let config = fast_config();
    let page = MockPage::new();
    install(&page, &config);
    let login = LoginPage::new(&page, &config);

    login.fill_email("user@example.com").await.unwrap();
    login.fill_password("secret").await.unwrap();
    assert_eq!(login.field_value(Field::Password).await.unwrap(), "secret");

    login.clear_form().await.unwrap();
    assert_eq!(login.field_value(Field::Email).await.unwrap(), "");
    assert_eq!(login.field_value(Field::Password).await.unwrap(), "");
}
