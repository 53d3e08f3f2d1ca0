//! Typed async client for the Fintech ledger and auth HTTP API.
//!
//! ```rust,no_run
//! use fintech_client::FintechClient;
//!
//! # async fn run() -> Result<(), fintech_client::ClientError> {
//! let client = FintechClient::with_base_url("sk_live_123", "https://api.example.com")?;
//! let tx = client
//!     .ledger
//!     .record_transaction("acc_1", 1_500, "USD", "Card top-up", "ref-42")
//!     .await?;
//! println!("{:?}", tx.status());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infra;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use app::{AuthService, FintechClient, LedgerService};
pub use domain::{ClientError, ConfigError};
pub use infra::{ClientConfig, HttpGateway};
