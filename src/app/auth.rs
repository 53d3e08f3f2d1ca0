//! Auth facade: API key validation.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::{
    ApiGateway, ApiRequest, ClientError, HttpMethod, ValidateKeyRequest, ValidationResponse,
    send_json,
};

pub const VALIDATE_PATH: &str = "/v1/auth/validate";

/// Lowercase hex SHA-256 of a raw API key
pub fn hash_api_key(raw_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_key.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn ApiGateway>,
}

impl AuthService {
    #[must_use]
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Validate a key hash (`POST /v1/auth/validate`)
    #[instrument(skip_all)]
    pub async fn validate_key(&self, key_hash: &str) -> Result<ValidationResponse, ClientError> {
        let payload = ValidateKeyRequest {
            key_hash: key_hash.to_string(),
        };
        let api_request = ApiRequest::new(HttpMethod::Post, VALIDATE_PATH).with_json(&payload)?;
        send_json(self.gateway.as_ref(), api_request).await
    }
}
