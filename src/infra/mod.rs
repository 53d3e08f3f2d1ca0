//! Infrastructure layer implementations.

pub mod http;

pub use http::{API_KEY_HEADER, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, HttpGateway};
