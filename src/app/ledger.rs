//! Ledger facade: transactions and account lookups.

use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::instrument;

use crate::domain::{
    AccountResponse, ApiGateway, ApiRequest, ClientError, HttpMethod, TransactionRequest,
    TransactionResponse, send_json,
};

pub const TRANSACTIONS_PATH: &str = "/v1/ledger/transactions";
pub const ACCOUNTS_PATH: &str = "/v1/ledger/accounts";

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Path for a single account, with the id escaped as one segment.
///
/// Empty, `.` and `..` ids are refused: URL parsing would collapse them as
/// dot segments and retarget the request, escaped or not.
pub fn account_path(account_id: &str) -> Result<String, ClientError> {
    if matches!(account_id, "" | "." | "..") {
        return Err(ClientError::InvalidPathSegment(account_id.to_string()));
    }
    Ok(format!(
        "{}/{}",
        ACCOUNTS_PATH,
        utf8_percent_encode(account_id, PATH_SEGMENT)
    ))
}

/// Ledger operations. Payload shaping only; the ledger service enforces
/// validation and reference-id deduplication.
#[derive(Clone)]
pub struct LedgerService {
    gateway: Arc<dyn ApiGateway>,
}

impl LedgerService {
    #[must_use]
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Record a ledger transaction (`POST /v1/ledger/transactions`)
    ///
    /// `amount` is signed and expressed in the smallest currency unit.
    pub async fn record_transaction(
        &self,
        account_id: &str,
        amount: i64,
        currency: &str,
        description: &str,
        reference_id: &str,
    ) -> Result<TransactionResponse, ClientError> {
        let request =
            TransactionRequest::new(account_id, amount, currency, description, reference_id);
        self.record(&request).await
    }

    /// Same as [`Self::record_transaction`], for a prebuilt payload
    #[instrument(skip(self, request), fields(account_id = %request.account_id, reference_id = %request.reference_id))]
    pub async fn record(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse, ClientError> {
        let api_request = ApiRequest::new(HttpMethod::Post, TRANSACTIONS_PATH).with_json(request)?;
        send_json(self.gateway.as_ref(), api_request).await
    }

    /// Fetch an account (`GET /v1/ledger/accounts/{accountId}`)
    #[instrument(skip(self))]
    pub async fn get_account(&self, account_id: &str) -> Result<AccountResponse, ClientError> {
        let api_request = ApiRequest::new(HttpMethod::Get, account_path(account_id)?);
        send_json(self.gateway.as_ref(), api_request).await
    }
}
