//! HTTP transport for the Fintech API.

pub mod config;
pub mod gateway;

pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use gateway::{API_KEY_HEADER, HttpGateway};
