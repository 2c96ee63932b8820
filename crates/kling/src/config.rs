//! Connection settings for the Kling API.

use std::borrow::Cow;

use validator::{Validate, ValidationError};

/// Base URL used when `KLING_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.klingai.com";

/// Credentials and endpoint for one Kling account.
///
/// Construct directly or via [`KlingConfig::from_env`], then hand it to
/// [`KlingClient::new`](crate::client::KlingClient::new), which validates
/// it before any request is made.
#[derive(Clone, Validate)]
pub struct KlingConfig {
    /// Access key, sent as the token issuer (`iss`).
    #[validate(custom(function = "not_blank"))]
    pub access_key: String,
    /// Shared secret used to sign tokens.
    #[validate(custom(function = "not_blank"))]
    pub secret_key: String,
    /// API root, e.g. `https://api.klingai.com`.
    #[validate(url(message = "base URL must be an absolute URL"))]
    pub base_url: String,
}

/// Reject empty and whitespace-only credentials.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("credential must not be blank")));
    }
    Ok(())
}

impl std::fmt::Debug for KlingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KlingConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Configuration could not be loaded or failed validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl KlingConfig {
    /// Build a config, trimming whitespace and any trailing `/` from the URL.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into().trim().to_string(),
            secret_key: secret_key.into().trim().to_string(),
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                   |
    /// |--------------------|----------|---------------------------|
    /// | `KLING_ACCESS_KEY` | **yes**  | --                        |
    /// | `KLING_SECRET_KEY` | **yes**  | --                        |
    /// | `KLING_BASE_URL`   | no       | `https://api.klingai.com` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_key = std::env::var("KLING_ACCESS_KEY")
            .map_err(|_| ConfigError::MissingVar("KLING_ACCESS_KEY"))?;
        let secret_key = std::env::var("KLING_SECRET_KEY")
            .map_err(|_| ConfigError::MissingVar("KLING_SECRET_KEY"))?;
        let base_url =
            std::env::var("KLING_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let config = Self::new(access_key, secret_key, base_url);
        config.validate()?;
        Ok(config)
    }
}
