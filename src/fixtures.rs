//! Read-only test input data.
//!
//! Scenarios load these; page objects never do.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPasswords {
    pub wrong_password: String,
    pub short_password: String,
}

/// Inputs for the login screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub valid_user: Credentials,
    pub invalid_passwords: InvalidPasswords,
    pub invalid_credentials: Vec<Credentials>,
    pub invalid_emails: Vec<String>,
}

impl Default for LoginData {
    fn default() -> Self {
        Self {
            valid_user: Credentials {
                email: "user@example.com".to_string(),
                password: "Password123!".to_string(),
            },
            invalid_passwords: InvalidPasswords {
                wrong_password: "WrongPassword1".to_string(),
                short_password: "123".to_string(),
            },
            invalid_credentials: vec![
                Credentials {
                    email: "nobody@example.com".to_string(),
                    password: "Password123!".to_string(),
                },
                Credentials {
                    email: "user@example.com".to_string(),
                    password: "wrong".to_string(),
                },
            ],
            invalid_emails: vec![
                "plainaddress".to_string(),
                "@missing-local.com".to_string(),
                "user@".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledInput {
    pub label: String,
    pub value: String,
}

/// Inputs for the GRC sign-in screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrcData {
    pub mobile_number: String,
    pub email: String,
    pub test_mobile_numbers: Vec<LabeledInput>,
    pub special_inputs: Vec<String>,
}

impl Default for GrcData {
    fn default() -> Self {
        Self {
            mobile_number: "8148438075".to_string(),
            email: "user@example.com".to_string(),
            test_mobile_numbers: vec![
                LabeledInput {
                    label: "ten digits".to_string(),
                    value: "8148438075".to_string(),
                },
                LabeledInput {
                    label: "country code".to_string(),
                    value: "+918148438075".to_string(),
                },
                LabeledInput {
                    label: "spaced".to_string(),
                    value: "81484 38075".to_string(),
                },
            ],
            special_inputs: vec![
                "test+tag@example.com".to_string(),
                "first.last@sub.example.co.in".to_string(),
                "<script>alert(1)</script>".to_string(),
            ],
        }
    }
}

/// Load a fixture file, e.g. `fixtures/grc.data.json`
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid fixture {}", path.display()))
}

/// Load a fixture, falling back to built-in defaults when the file is missing
pub fn load_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> Result<T> {
    if path.as_ref().exists() {
        load(path)
    } else {
        Ok(T::default())
    }
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures_test;
