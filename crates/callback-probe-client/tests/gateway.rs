//! Direct gateway tests against a mock server.

use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use callback_probe_client::{ClientOptions, GatewayClient, ProbeError};
use callback_probe_core::TransactionInit;

fn init() -> TransactionInit {
    TransactionInit::probe(
        "direct.test@example.com",
        500_000,
        "NGN",
        Some("http://localhost:3000/flights/booking-confirmation"),
        Utc.timestamp_millis_opt(1_707_991_200_000).unwrap(),
    )
    .expect("probe payload is valid")
}

#[tokio::test]
async fn initialize_sends_bearer_key_and_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transaction/initialize"))
        .and(header("authorization", "Bearer sk_test_mock"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "direct.test@example.com",
            "amount": 500_000,
            "reference": "CBP-DIRECT-1707991200000",
            "currency": "NGN",
            "callback_url": "http://localhost:3000/flights/booking-confirmation"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/0peioxfhpn",
                "access_code": "0peioxfhpn",
                "reference": "CBP-DIRECT-1707991200000"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(server.uri(), "sk_test_mock", ClientOptions::default())
        .expect("Failed to create gateway client");
    let link = client.initialize_transaction(&init()).await.unwrap();

    assert_eq!(
        link.authorization_url,
        "https://checkout.paystack.com/0peioxfhpn"
    );
    assert_eq!(link.reference, "CBP-DIRECT-1707991200000");
}

#[tokio::test]
async fn rejected_key_is_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transaction/initialize"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": false,
            "message": "Invalid key"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(server.uri(), "sk_test_wrong", ClientOptions::default())
        .expect("Failed to create gateway client");
    let err = client.initialize_transaction(&init()).await.unwrap_err();

    match err {
        ProbeError::Application(e) => {
            assert_eq!(e.message, "Invalid key");
            assert_eq!(e.response["status"], false);
        }
        other => panic!("expected application error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_gateway_reply_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = GatewayClient::new(server.uri(), "sk_test_mock", ClientOptions::default())
        .expect("Failed to create gateway client");
    let err = client.initialize_transaction(&init()).await.unwrap_err();

    assert!(matches!(err, ProbeError::Parse { status: 503, .. }));
}
