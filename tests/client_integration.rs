//! End-to-end tests for the ledger and auth facades over a mocked API.

use std::collections::HashSet;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

use fintech_client::app::hash_api_key;
use fintech_client::{ClientError, FintechClient};

fn client_for(mock_server: &MockServer) -> FintechClient {
    FintechClient::with_base_url("sk_test_123", mock_server.uri()).unwrap()
}

// ============================================================================
// LEDGER
// ============================================================================

mod ledger_tests {
    use super::*;

    #[tokio::test]
    async fn test_record_transaction_sends_wire_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/ledger/transactions"))
            .and(header("x-api-key", "sk_test_123"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "accountId": "acc_42",
                "amount": -1999,
                "currency": "GBP",
                "description": "Chargeback",
                "referenceId": "ref-0001"
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"transactionId": "tx_9", "status": "posted"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tx = client
            .ledger
            .record_transaction("acc_42", -1999, "GBP", "Chargeback", "ref-0001")
            .await
            .unwrap();

        assert_eq!(tx.transaction_id(), Some("tx_9"));
        assert_eq!(tx.status(), Some("posted"));

        let received = mock_server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        let keys: HashSet<&str> = sent
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            HashSet::from(["accountId", "amount", "currency", "description", "referenceId"])
        );
    }

    #[tokio::test]
    async fn test_record_transaction_returns_mapping_unmodified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/ledger/transactions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "tx_1", "status": "posted"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let tx = client
            .ledger
            .record_transaction("acc_1", 100, "USD", "test", "ref-1")
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&tx).unwrap(),
            json!({"id": "tx_1", "status": "posted"})
        );
    }

    #[tokio::test]
    async fn test_get_account_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ledger/accounts/acc_1"))
            .and(header("x-api-key", "sk_test_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accountId": "acc_1",
                "balance": 125_000,
                "currency": "USD",
                "createdAt": "2024-01-15T09:30:00Z"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let account = client.ledger.get_account("acc_1").await.unwrap();

        assert_eq!(account.account_id(), Some("acc_1"));
        assert_eq!(account.balance(), Some(125_000));
        assert_eq!(account.currency(), Some("USD"));
        assert!(account.created_at().is_some());
    }

    #[tokio::test]
    async fn test_get_account_escapes_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/ledger/accounts/org%2Facc%201%3F"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountId": "x"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.ledger.get_account("org/acc 1?").await.unwrap();

        let received = mock_server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_get_account_dot_segment_ids_never_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountId": "x"})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        for id in ["..", ".", ""] {
            let err = client.ledger.get_account(id).await.unwrap_err();
            assert!(
                matches!(err, ClientError::InvalidPathSegment(ref s) if s == id),
                "unexpected error for {id:?}: {err:?}"
            );
        }

        let received = mock_server.received_requests().await.unwrap();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_get_account_round_trips_server_mapping() {
        let mock_server = MockServer::start().await;

        let body = json!({
            "accountId": "acc_1",
            "balance": 10.5,
            "currency": null,
            "createdAt": "2024-01-15T09:30:00.000+02:00",
            "tier": "gold"
        });
        Mock::given(method("GET"))
            .and(path("/v1/ledger/accounts/acc_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let account = client.ledger.get_account("acc_1").await.unwrap();

        assert_eq!(account.currency(), None);
        assert_eq!(account.get("tier"), Some(&json!("gold")));
        assert_eq!(serde_json::to_value(&account).unwrap(), body);
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"error":"account not found"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.ledger.get_account("missing").await.unwrap_err();

        match err {
            ClientError::Remote { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"error":"account not found"}"#);
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unprocessable_is_not_reclassified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("duplicate referenceId"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .ledger
            .record_transaction("acc_1", 1, "USD", "dup", "ref-dup")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.body(), Some("duplicate referenceId"));
    }
}

// ============================================================================
// AUTH
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_key_sends_key_hash() {
        let mock_server = MockServer::start().await;
        let key_hash = hash_api_key("sk_live_abc");

        Mock::given(method("POST"))
            .and(path("/v1/auth/validate"))
            .and(body_json(json!({"keyHash": key_hash})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "valid": true,
                "userId": "user_1",
                "orgId": "org_1",
                "environment": "live",
                "scopes": "ledger:read ledger:write"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.auth.validate_key(&key_hash).await.unwrap();

        assert!(result.is_valid());
        assert_eq!(result.user_id(), Some("user_1"));
        assert_eq!(result.environment(), Some("live"));
    }

    #[tokio::test]
    async fn test_concurrent_validations_do_not_interfere() {
        let mock_server = MockServer::start().await;

        for i in 0..8 {
            Mock::given(method("POST"))
                .and(path("/v1/auth/validate"))
                .and(body_json(json!({"keyHash": format!("hash_{i}")})))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"valid": true, "userId": format!("user_{i}")})),
                )
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = client_for(&mock_server);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let client = client.clone();
                tokio::spawn(async move {
                    let result = client.auth.validate_key(&format!("hash_{i}")).await;
                    (i, result)
                })
            })
            .collect();

        for handle in handles {
            let (i, result) = handle.await.unwrap();
            let expected = format!("user_{i}");
            assert_eq!(result.unwrap().user_id(), Some(expected.as_str()));
        }
    }
}

// ============================================================================
// DECODE FAILURES
// ============================================================================

mod decode_tests {
    use super::*;

    async fn non_json_server() -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_every_facade_call_fails_with_decode_error() {
        let mock_server = non_json_server().await;
        let client = client_for(&mock_server);

        let err = client
            .ledger
            .record_transaction("acc_1", 1, "USD", "d", "r")
            .await
            .unwrap_err();
        assert!(err.is_decode());

        let err = client.ledger.get_account("acc_1").await.unwrap_err();
        assert!(err.is_decode());

        let err = client.auth.validate_key("h").await.unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.body(), Some("<html>maintenance</html>"));
    }
}
