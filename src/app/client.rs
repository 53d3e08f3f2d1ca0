//! Client entry point composing the facades over one shared gateway.

use std::sync::Arc;

use crate::domain::{ApiGateway, ClientError};
use crate::infra::{ClientConfig, HttpGateway};

use super::auth::AuthService;
use super::ledger::LedgerService;

/// Fintech API client
///
/// The facades are built once and share the same gateway, so cloning the
/// client or calling it from several tasks reuses one connection pool.
#[derive(Clone)]
pub struct FintechClient {
    pub ledger: LedgerService,
    pub auth: AuthService,
    gateway: Arc<dyn ApiGateway>,
}

impl FintechClient {
    /// Client against the default local endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::new(api_key)?)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let config = ClientConfig::builder(api_key).base_url(base_url).build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let gateway = HttpGateway::new(config)?;
        Ok(Self::with_gateway(Arc::new(gateway)))
    }

    /// Build over any gateway implementation (mocks, custom transports)
    #[must_use]
    pub fn with_gateway(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            ledger: LedgerService::new(Arc::clone(&gateway)),
            auth: AuthService::new(Arc::clone(&gateway)),
            gateway,
        }
    }

    /// The shared gateway, for endpoints without a dedicated facade method
    pub fn gateway(&self) -> &Arc<dyn ApiGateway> {
        &self.gateway
    }
}
