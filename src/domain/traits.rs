//! Gateway contract shared by the facades and the HTTP implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ClientError, ConfigError};
use super::types::HttpMethod;

/// A single outbound call, built fresh for every request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Relative path beginning with `/`, already percent-encoded
    pub path: String,
    pub body: Option<Value>,
    /// Per-call headers, sent on top of the gateway's standing headers
    pub headers: HeaderMap,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Attach a JSON payload
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Encode)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Add a per-call header override
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::InvalidHeader(e.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Full request target. Plain concatenation: no slash is added or removed.
    pub fn target(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.path)
    }
}

/// Performs one HTTP exchange and maps the outcome to JSON or a [`ClientError`]
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Send a prepared request and return the decoded JSON body
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;

    /// Convenience wrapper for callers that only need method, path and body
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.send(ApiRequest::new(method, path).with_body(body)).await
    }
}

/// Send a request and decode the response into a typed shape.
///
/// A body that is valid JSON but has the wrong shape is a decode failure
/// whose `body` is the parsed value serialized back to compact JSON, not the
/// bytes received.
pub async fn send_json<T: DeserializeOwned>(
    gateway: &dyn ApiGateway,
    request: ApiRequest,
) -> Result<T, ClientError> {
    let value = gateway.send(request).await?;
    T::deserialize(&value).map_err(|source| ClientError::Decode {
        source,
        body: value.to_string(),
    })
}
