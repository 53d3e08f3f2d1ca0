//! Domain layer containing wire types, the gateway contract, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ClientError, ConfigError};
pub use traits::{ApiGateway, ApiRequest, send_json};
pub use types::{
    AccountResponse, HttpMethod, TransactionRequest, TransactionResponse, ValidateKeyRequest,
    ValidationResponse,
};
