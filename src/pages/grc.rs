use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::config::SuiteConfig;
use crate::errors::{PageError, PageResult};
use crate::handle::PageHandle;
use crate::locator::Locator;
use crate::page::BasePage;
use crate::types::{LoadState, Presence};

/// What varies between deployments of the GRC sign-in screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrcConfig {
    pub path: String,
    pub heading: String,
    pub input_css: String,
    pub error_css: String,
    /// Substring every empty-submit error message contains
    pub required_message: String,
    /// Class fragments marking the label as floated above the input
    pub floating_label_tokens: Vec<String>,
    /// Class fragments marking the input as invalid
    pub error_style_tokens: Vec<String>,
    /// Sign-up link target; also the route `wait_for_sign_up` waits for
    pub sign_up_href: String,
    pub terms_of_service_href: String,
    pub privacy_policy_href: String,
}

impl Default for GrcConfig {
    fn default() -> Self {
        Self {
            path: "/grc/auth/signin".to_string(),
            heading: "Log into your account".to_string(),
            input_css: "#login-id".to_string(),
            error_css: ".text-red-500".to_string(),
            required_message: "required".to_string(),
            floating_label_tokens: vec![
                "-translate-y".to_string(),
                "scale-75".to_string(),
                "floating".to_string(),
            ],
            error_style_tokens: vec![
                "border-red-500".to_string(),
                "border-red".to_string(),
                "is-invalid".to_string(),
            ],
            sign_up_href: "/grc/auth/signup".to_string(),
            terms_of_service_href: "https://vakilsearch.com/terms-of-service".to_string(),
            privacy_policy_href: "https://vakilsearch.com/privacy-policy".to_string(),
        }
    }
}

/// GRC sign-in: email or mobile number, then an OTP
pub struct GrcPage<'a, H: PageHandle + ?Sized> {
    base: BasePage<'a, H>,
    config: GrcConfig,
    page_title: Locator,
    email_input: Locator,
    email_label: Locator,
    get_otp_button: Locator,
    login_with_password_button: Locator,
    sign_up_link: Locator,
    error_message: Locator,
    login_form: Locator,
    terms_of_service_link: Locator,
    privacy_policy_link: Locator,
}

impl<'a, H: PageHandle + ?Sized> GrcPage<'a, H> {
    pub fn new(handle: &'a H, suite: &'a SuiteConfig) -> Self {
        Self::with_config(handle, suite, GrcConfig::default())
    }

    pub fn with_config(handle: &'a H, suite: &'a SuiteConfig, config: GrcConfig) -> Self {
        let input_id = config.input_css.trim_start_matches('#').to_string();
        Self {
            base: BasePage::new(handle, suite),
            page_title: Locator::css_with_text("page title", "h1", &config.heading),
            email_input: Locator::css("email input", &config.input_css),
            email_label: Locator::css("email label", format!("label[for='{}']", input_id)),
            get_otp_button: Locator::role("get otp button", "button", "Get OTP"),
            login_with_password_button: Locator::role(
                "login with password button",
                "button",
                "Login with Password",
            ),
            sign_up_link: Locator::role("sign up link", "link", "Sign Up"),
            error_message: Locator::css("error message", &config.error_css),
            login_form: Locator::css("login form", "form"),
            terms_of_service_link: Locator::css(
                "terms of service link",
                format!("a[href='{}']", config.terms_of_service_href),
            ),
            privacy_policy_link: Locator::css(
                "privacy policy link",
                format!("a[href='{}']", config.privacy_policy_href),
            ),
            config,
        }
    }

    pub fn base(&self) -> &BasePage<'a, H> {
        &self.base
    }

    pub fn config(&self) -> &GrcConfig {
        &self.config
    }

    pub fn page_title(&self) -> &Locator {
        &self.page_title
    }

    pub fn email_input(&self) -> &Locator {
        &self.email_input
    }

    pub fn email_label(&self) -> &Locator {
        &self.email_label
    }

    pub fn get_otp_button(&self) -> &Locator {
        &self.get_otp_button
    }

    pub fn login_with_password_button(&self) -> &Locator {
        &self.login_with_password_button
    }

    pub fn sign_up_link(&self) -> &Locator {
        &self.sign_up_link
    }

    pub fn error_message_region(&self) -> &Locator {
        &self.error_message
    }

    pub fn login_form(&self) -> &Locator {
        &self.login_form
    }

    pub fn terms_of_service_link(&self) -> &Locator {
        &self.terms_of_service_link
    }

    pub fn privacy_policy_link(&self) -> &Locator {
        &self.privacy_policy_link
    }

    pub async fn navigate(&self) -> PageResult<()> {
        self.base.navigate(&self.config.path).await?;
        self.wait_for_page_load().await
    }

    /// Heading, input and Get OTP button all visible
    pub async fn wait_for_page_load(&self) -> PageResult<()> {
        self.base.expect_visible(&self.page_title).await?;
        self.base.expect_visible(&self.email_input).await?;
        self.base.expect_visible(&self.get_otp_button).await
    }

    /// Clear the login field, type `value`, and confirm it reads back unchanged
    pub async fn enter_email_or_mobile(&self, value: &str) -> PageResult<()> {
        self.base.clear(&self.email_input).await?;
        self.base.fill_checked(&self.email_input, value).await
    }

    pub async fn click_get_otp(&self) -> PageResult<()> {
        self.base.click_checked(&self.get_otp_button).await
    }

    pub async fn perform_login(&self, email_or_mobile: &str) -> PageResult<()> {
        info!("Requesting OTP for {}", email_or_mobile);
        self.enter_email_or_mobile(email_or_mobile).await?;
        self.click_get_otp().await
    }

    pub async fn click_login_with_password(&self) -> PageResult<()> {
        self.base
            .click_visible(&self.login_with_password_button)
            .await
    }

    pub async fn click_sign_up(&self) -> PageResult<()> {
        self.base.click_visible(&self.sign_up_link).await
    }

    pub async fn email_input_value(&self) -> PageResult<String> {
        self.base.input_value(&self.email_input).await
    }

    pub async fn email_input_placeholder(&self) -> PageResult<Option<String>> {
        self.base.attribute(&self.email_input, "placeholder").await
    }

    pub async fn is_get_otp_enabled(&self) -> PageResult<bool> {
        self.base.is_enabled(&self.get_otp_button).await
    }

    pub async fn is_login_with_password_visible(&self) -> bool {
        self.base
            .is_element_visible(&self.login_with_password_button)
            .await
    }

    pub async fn is_sign_up_visible(&self) -> bool {
        self.base.is_element_visible(&self.sign_up_link).await
    }

    pub async fn verify_sign_up_link(&self) -> PageResult<()> {
        self.base.expect_visible(&self.sign_up_link).await?;
        self.base
            .expect_attribute(&self.sign_up_link, "href", Some(self.config.sign_up_href.as_str()))
            .await
    }

    pub async fn is_login_form_visible(&self) -> bool {
        self.base.is_element_visible(&self.login_form).await
    }

    /// Error text, or `None` if no error shows up within the probe window
    pub async fn error_message(&self) -> Option<String> {
        if !self.is_error_message_displayed().await {
            return None;
        }
        self.base.text(&self.error_message).await.ok()
    }

    pub async fn is_error_message_displayed(&self) -> bool {
        let within = self.base.config().timeouts.error_probe();
        self.base.probe(&self.error_message, within).await == Presence::Found
    }

    pub async fn verify_page_title(&self) -> PageResult<()> {
        self.base
            .expect_text_contains(&self.page_title, &self.config.heading)
            .await
    }

    pub async fn verify_page_elements(&self) -> PageResult<()> {
        for locator in [
            &self.email_input,
            &self.email_label,
            &self.get_otp_button,
            &self.login_with_password_button,
            &self.sign_up_link,
        ] {
            self.base.expect_visible(locator).await?;
        }
        Ok(())
    }

    /// Submit with Enter from the login field instead of the button
    pub async fn submit_form(&self) -> PageResult<()> {
        self.base.press(&self.email_input, "Enter").await
    }

    pub async fn clear_input(&self) -> PageResult<()> {
        self.base.clear(&self.email_input).await
    }

    pub async fn is_floating_label_active(&self) -> PageResult<bool> {
        self.base
            .has_class_token(&self.email_label, &self.config.floating_label_tokens)
            .await
    }

    /// Error classes on the input, or `aria-invalid="true"`
    pub async fn has_input_error_styling(&self) -> PageResult<bool> {
        if self
            .base
            .has_class_token(&self.email_input, &self.config.error_style_tokens)
            .await?
        {
            return Ok(true);
        }
        let invalid = self
            .base
            .attribute(&self.email_input, "aria-invalid")
            .await?;
        Ok(invalid.as_deref() == Some("true"))
    }

    /// Required-field error visible, mentions the required message, and the
    /// input carries error styling
    pub async fn verify_email_input_error_state(&self) -> PageResult<()> {
        let message = self.error_message().await.ok_or_else(|| {
            PageError::expectation(&self.error_message, "to be visible", "nothing")
        })?;
        if !message.contains(&self.config.required_message) {
            return Err(PageError::expectation(
                &self.error_message,
                format!("to contain {:?}", self.config.required_message),
                format!("{:?}", message),
            ));
        }
        if !self.has_input_error_styling().await? {
            return Err(PageError::expectation(
                &self.email_input,
                "error styling",
                "no error classes",
            ));
        }
        Ok(())
    }

    /// Give the page time to settle after a submit
    pub async fn wait_for_form_submission(&self) -> PageResult<()> {
        self.base
            .wait_for_load_state(LoadState::NetworkIdle, self.base.config().timeouts.navigation())
            .await
    }

    /// Wait for the page to land on the sign-up route
    pub async fn wait_for_sign_up(&self, timeout: Duration) -> PageResult<String> {
        let href = self.config.sign_up_href.as_str();
        self.base
            .wait_for_url(&format!("containing {}", href), timeout, |url| url.contains(href))
            .await
    }
}

#[cfg(test)]
#[path = "grc_test.rs"]
mod grc_test;
