//! reqwest-backed implementation of [`ApiGateway`].
//!
//! One `reqwest::Client` is built per gateway and reused for every call. It
//! carries the two standing headers, `Content-Type: application/json` and
//! `X-API-Key`, as client defaults so no request can go out without them.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::domain::{ApiGateway, ApiRequest, ClientError, ConfigError};

use super::config::ClientConfig;

/// Header carrying the API key on every request (`X-API-Key`)
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// HTTP gateway holding the connection configuration and a pooled client
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: Client,
    config: Arc<ClientConfig>,
}

impl HttpGateway {
    /// Build the gateway and its reusable HTTP client
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut api_key = HeaderValue::from_str(config.api_key().expose_secret())
            .map_err(|_| ConfigError::InvalidHeader("X-API-Key value".to_string()))?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent.to_string());
        }
        let http_client = builder.build()?;

        debug!(base_url = %config.base_url(), "HTTP gateway initialized");

        Ok(Self {
            http_client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = request.target(self.base_url());

        debug!(url = %url, has_body = request.body.is_some(), "Sending request");

        let mut builder = self
            .http_client
            .request(request.method.into(), &url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, url = %url, "Request failed before a response was received");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, status = %status, "Failed to read response body");
            ClientError::Transport(e)
        })?;

        if !status.is_success() {
            error!(status = %status, body = %body, "API returned error status");
            return Err(ClientError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let value = serde_json::from_str::<Value>(&body).map_err(|source| {
            error!(error = %source, status = %status, "Failed to parse response body as JSON");
            ClientError::Decode { source, body }
        })?;

        debug!(status = %status, "Request complete");
        Ok(value)
    }
}
