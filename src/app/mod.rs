//! Application layer: the domain facades and the client that composes them.

pub mod auth;
pub mod client;
pub mod ledger;

pub use auth::{AuthService, hash_api_key};
pub use client::FintechClient;
pub use ledger::{LedgerService, account_path};
