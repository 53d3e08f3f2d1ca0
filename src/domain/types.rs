//! Wire request and response shapes.
//!
//! Request fields follow Rust conventions in code and lower camel case on the
//! wire. Response types hold the server's mapping untouched and expose the
//! documented keys through typed accessors, so a decoded response serializes
//! back to exactly what the server sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HTTP verbs accepted by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(format!("Unsupported HTTP method: {}", s)),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Payload for `POST /v1/ledger/transactions`
///
/// No local validation is applied; the ledger service is the authority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub account_id: String,
    /// Signed amount in the smallest currency unit (e.g. cents)
    pub amount: i64,
    /// ISO 4217-style currency code
    pub currency: String,
    pub description: String,
    /// Caller-supplied correlation token, passed through untouched
    pub reference_id: String,
}

impl TransactionRequest {
    #[must_use]
    pub fn new(
        account_id: impl Into<String>,
        amount: i64,
        currency: impl Into<String>,
        description: impl Into<String>,
        reference_id: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            currency: currency.into(),
            description: description.into(),
            reference_id: reference_id.into(),
        }
    }
}

/// Payload for `POST /v1/auth/validate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyRequest {
    pub key_hash: String,
}

/// Raw mapping plus typed lookups shared by the response types
macro_rules! wire_mapping {
    ($name:ident) => {
        impl $name {
            /// The mapping exactly as the server sent it
            pub fn as_map(&self) -> &Map<String, Value> {
                &self.raw
            }

            pub fn into_map(self) -> Map<String, Value> {
                self.raw
            }

            /// Any key, including ones without a typed accessor
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.raw.get(key)
            }

            fn str_field(&self, key: &str) -> Option<&str> {
                self.raw.get(key).and_then(Value::as_str)
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(raw: Map<String, Value>) -> Self {
                Self { raw }
            }
        }
    };
}

/// Response from `POST /v1/ledger/transactions`
///
/// Serializes back to the server's mapping unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TransactionResponse {
    raw: Map<String, Value>,
}

wire_mapping!(TransactionResponse);

impl TransactionResponse {
    pub fn transaction_id(&self) -> Option<&str> {
        self.str_field("transactionId")
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }
}

/// Response from `GET /v1/ledger/accounts/{accountId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AccountResponse {
    raw: Map<String, Value>,
}

wire_mapping!(AccountResponse);

impl AccountResponse {
    pub fn account_id(&self) -> Option<&str> {
        self.str_field("accountId")
    }

    /// Balance in the smallest currency unit, if it is an integer
    pub fn balance(&self) -> Option<i64> {
        self.balance_number().and_then(serde_json::Number::as_i64)
    }

    /// Balance exactly as sent, integer or not
    pub fn balance_number(&self) -> Option<&serde_json::Number> {
        match self.raw.get("balance") {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn currency(&self) -> Option<&str> {
        self.str_field("currency")
    }

    /// Creation timestamp string as sent by the server
    pub fn created_at_raw(&self) -> Option<&str> {
        self.str_field("createdAt")
    }

    /// Creation timestamp, when the server sent RFC 3339
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at_raw()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Response from `POST /v1/auth/validate`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationResponse {
    raw: Map<String, Value>,
}

wire_mapping!(ValidationResponse);

impl ValidationResponse {
    /// True only when the service explicitly reported the key as valid
    pub fn is_valid(&self) -> bool {
        self.raw.get("valid").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.str_field("userId")
    }

    pub fn org_id(&self) -> Option<&str> {
        self.str_field("orgId")
    }

    pub fn environment(&self) -> Option<&str> {
        self.str_field("environment")
    }

    /// Space or comma separated scope list, as issued by the auth service
    pub fn scopes(&self) -> Option<&str> {
        self.str_field("scopes")
    }
}
