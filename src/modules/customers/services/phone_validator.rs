use std::time::Duration;

use serde::Deserialize;

use crate::config::ServicesConfig;
use crate::core::{AppError, Result};

/// Phone number checker backed by the Abstract API validation service.
///
/// Any transport or API failure falls back to a local pattern check so
/// customer creation never depends on the external service being up.
pub struct PhoneValidator {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PhoneValidation {
    valid: bool,
}

impl PhoneValidator {
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            api_key: config.phone_validation_api_key.clone(),
            base_url: config.phone_validation_base_url.clone(),
        })
    }

    /// Whether the given phone number is valid.
    pub async fn validate(&self, phone: &str) -> bool {
        match self.check_remote(phone).await {
            Ok(valid) => valid,
            Err(err) => {
                tracing::warn!("phone validation service unavailable, using pattern check: {err}");
                Self::matches_pattern(phone)
            }
        }
    }

    async fn check_remote(&self, phone: &str) -> Result<bool> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("PHONE_VALIDATION_API_KEY not set".to_string())
        })?;

        let validation: PhoneValidation = self
            .client
            .get(self.base_url.as_str())
            .query(&[("api_key", api_key), ("phone", phone)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(validation.valid)
    }

    /// Local fallback: an optional leading `+` followed by 2 to 15 digits.
    pub fn matches_pattern(phone: &str) -> bool {
        let digits = phone.strip_prefix('+').unwrap_or(phone);

        (2..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
    }
}
