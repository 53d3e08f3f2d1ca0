//! Connection configuration for the HTTP gateway.

use std::time::Duration;

use reqwest::Url;
use secrecy::SecretString;

use crate::domain::ConfigError;

/// Default API base URL (local development server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Immutable gateway configuration
///
/// The API key is held as a [`SecretString`] and is redacted from `Debug` output.
#[derive(Debug)]
pub struct ClientConfig {
    api_key: SecretString,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration pointing at [`DEFAULT_BASE_URL`]
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(api_key).build()
    }

    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_key: api_key.into(),
            base_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-request timeout. Unset means the HTTP client's default (none).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        Ok(ClientConfig {
            api_key: SecretString::from(self.api_key),
            base_url,
            timeout: self.timeout,
            user_agent: self.user_agent,
        })
    }
}

/// Validate an absolute http(s) URL and strip trailing slashes.
///
/// The stored form is the caller's string, not `Url`'s serialization, which
/// would append a `/` to a bare host.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    }

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl(format!("{raw}: missing host")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl(format!(
            "{raw}: query and fragment are not allowed"
        )));
    }

    Ok(trimmed.to_string())
}
