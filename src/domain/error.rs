//! Error types for the client.
//!
//! Every failure surfaces to the caller as a [`ClientError`]. Nothing is
//! retried or swallowed, and the gateway remains usable after any error.

use thiserror::Error;

/// Client construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key must not be empty")]
    EmptyApiKey,
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Unsupported base URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

/// Top-level error returned by every gateway and facade call
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a non-2xx status
    #[error("Remote error (status {status}): {body}")]
    Remote { status: u16, body: String },

    /// A 2xx response whose body is not the expected JSON.
    ///
    /// `body` is the text as received when it failed to parse. When it parsed
    /// but had the wrong shape, `body` is the parsed value re-serialized, which
    /// can differ from the received bytes in whitespace, key order and number
    /// formatting.
    #[error("Decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The request payload could not be serialized
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An id that cannot be carried as a single URL path segment
    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),
}

impl ClientError {
    /// HTTP status of a [`ClientError::Remote`] failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body attached to a [`ClientError::Remote`] or
    /// [`ClientError::Decode`] failure.
    ///
    /// Verbatim for remote errors and unparseable bodies; re-serialized JSON
    /// for shape mismatches.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Remote { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
