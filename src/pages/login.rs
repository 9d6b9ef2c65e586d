use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SuiteConfig;
use crate::errors::{PageError, PageResult};
use crate::handle::PageHandle;
use crate::locator::Locator;
use crate::page::BasePage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub path: String,
    pub heading: String,
    /// Message shown for rejected credentials
    pub invalid_credentials_message: String,
    pub forgot_password_href: String,
    pub sign_up_href: String,
    /// How long a successful login may take to leave the login route
    pub redirect_timeout_ms: u64,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            path: "/login".to_string(),
            heading: "Sign In".to_string(),
            invalid_credentials_message: "Invalid email or password".to_string(),
            forgot_password_href: "/forgot-password".to_string(),
            sign_up_href: "/signup".to_string(),
            redirect_timeout_ms: 5_000,
        }
    }
}

/// Input fields on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

/// Email + password sign-in form
pub struct LoginPage<'a, H: PageHandle + ?Sized> {
    base: BasePage<'a, H>,
    config: LoginConfig,
    page_title: Locator,
    email_input: Locator,
    password_input: Locator,
    remember_me_checkbox: Locator,
    login_button: Locator,
    forgot_password_link: Locator,
    signup_link: Locator,
    error_message: Locator,
    login_form: Locator,
}

impl<'a, H: PageHandle + ?Sized> LoginPage<'a, H> {
    pub fn new(handle: &'a H, suite: &'a SuiteConfig) -> Self {
        Self::with_config(handle, suite, LoginConfig::default())
    }

    pub fn with_config(handle: &'a H, suite: &'a SuiteConfig, config: LoginConfig) -> Self {
        Self {
            base: BasePage::new(handle, suite),
            page_title: Locator::role("page title", "heading", &config.heading),
            email_input: Locator::role("email input", "textbox", "Email Address"),
            password_input: Locator::label("password input", "Password"),
            remember_me_checkbox: Locator::role("remember me checkbox", "checkbox", "Remember me"),
            login_button: Locator::role("login button", "button", &config.heading),
            forgot_password_link: Locator::role("forgot password link", "link", "Forgot password?"),
            signup_link: Locator::role("sign up link", "link", "Sign up"),
            error_message: Locator::css("error message", "#errorMessage"),
            login_form: Locator::css("login form", "#loginForm"),
            config,
        }
    }

    pub fn base(&self) -> &BasePage<'a, H> {
        &self.base
    }

    pub fn page_title(&self) -> &Locator {
        &self.page_title
    }

    pub fn email_input(&self) -> &Locator {
        &self.email_input
    }

    pub fn password_input(&self) -> &Locator {
        &self.password_input
    }

    pub fn remember_me_checkbox(&self) -> &Locator {
        &self.remember_me_checkbox
    }

    pub fn login_button(&self) -> &Locator {
        &self.login_button
    }

    pub fn forgot_password_link(&self) -> &Locator {
        &self.forgot_password_link
    }

    pub fn signup_link(&self) -> &Locator {
        &self.signup_link
    }

    pub fn error_message_region(&self) -> &Locator {
        &self.error_message
    }

    pub fn login_form(&self) -> &Locator {
        &self.login_form
    }

    fn field(&self, field: Field) -> &Locator {
        match field {
            Field::Email => &self.email_input,
            Field::Password => &self.password_input,
        }
    }

    pub async fn navigate(&self) -> PageResult<()> {
        self.base.navigate(&self.config.path).await?;
        self.base.expect_visible(&self.page_title).await
    }

    pub async fn fill_email(&self, email: &str) -> PageResult<()> {
        self.base.fill_checked(&self.email_input, email).await
    }

    pub async fn fill_password(&self, password: &str) -> PageResult<()> {
        self.base.fill_checked(&self.password_input, password).await
    }

    pub async fn field_value(&self, field: Field) -> PageResult<String> {
        self.base.input_value(self.field(field)).await
    }

    pub async fn toggle_remember_me(&self) -> PageResult<()> {
        self.base.click_visible(&self.remember_me_checkbox).await
    }

    pub async fn is_remember_me_checked(&self) -> PageResult<bool> {
        self.base
            .handle()
            .is_checked(&self.remember_me_checkbox)
            .await
            .map_err(|e| PageError::query("read remember me state", e))
    }

    pub async fn click_login(&self) -> PageResult<()> {
        self.base.click_checked(&self.login_button).await
    }

    /// Fill whichever credentials are non-empty, optionally tick remember
    /// me, then submit. Empty values leave their field untouched so the
    /// form's own required-field validation can fire.
    pub async fn login(&self, email: &str, password: &str, remember_me: bool) -> PageResult<()> {
        if !email.is_empty() {
            self.fill_email(email).await?;
        }
        if !password.is_empty() {
            self.fill_password(password).await?;
        }
        if remember_me {
            self.toggle_remember_me().await?;
        }
        self.click_login().await
    }

    pub async fn is_error_message_displayed(&self) -> bool {
        let within = self.base.config().timeouts.error_probe();
        self.base.probe(&self.error_message, within).await.is_found()
    }

    pub async fn error_message(&self) -> Option<String> {
        if !self.is_error_message_displayed().await {
            return None;
        }
        self.base.text(&self.error_message).await.ok()
    }

    /// `None` checks for the configured invalid-credentials message
    pub async fn verify_error_message(&self, expected: Option<&str>) -> PageResult<()> {
        let expected = expected.unwrap_or(self.config.invalid_credentials_message.as_str());
        self.base
            .expect_text_contains(&self.error_message, expected)
            .await
    }

    pub async fn verify_no_error_message(&self) -> PageResult<()> {
        self.base.expect_hidden(&self.error_message).await
    }

    pub async fn verify_forgot_password_link(&self) -> PageResult<()> {
        self.base.expect_visible(&self.forgot_password_link).await?;
        self.base
            .expect_attribute(
                &self.forgot_password_link,
                "href",
                Some(self.config.forgot_password_href.as_str()),
            )
            .await
    }

    pub async fn click_forgot_password(&self) -> PageResult<()> {
        self.base.click_visible(&self.forgot_password_link).await
    }

    pub async fn verify_sign_up_link(&self) -> PageResult<()> {
        self.base.expect_visible(&self.signup_link).await?;
        self.base
            .expect_attribute(&self.signup_link, "href", Some(self.config.sign_up_href.as_str()))
            .await
    }

    pub async fn click_sign_up(&self) -> PageResult<()> {
        self.base.click_visible(&self.signup_link).await
    }

    /// The field must carry the HTML `required` attribute
    pub async fn verify_required_field(&self, field: Field) -> PageResult<()> {
        self.base
            .expect_attribute(self.field(field), "required", None)
            .await
    }

    pub async fn clear_form(&self) -> PageResult<()> {
        self.base.clear(&self.email_input).await?;
        self.base.clear(&self.password_input).await
    }

    /// Wait until the browser has left the login route
    pub async fn wait_for_successful_login(&self) -> PageResult<String> {
        let path = self.config.path.clone();
        self.base
            .wait_for_url(
                &format!("not containing {}", path),
                Duration::from_millis(self.config.redirect_timeout_ms),
                move |url| !url.is_empty() && !url.contains(&path),
            )
            .await
    }

    pub async fn verify_login_form_displayed(&self) -> PageResult<()> {
        for locator in [
            &self.login_form,
            &self.email_input,
            &self.password_input,
            &self.login_button,
        ] {
            self.base.expect_visible(locator).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;
