//! Integration tests for the HTTP upstream.
//!
//! These tests run the client against a local mock processor and verify the
//! signing envelope as the processor would: by recomputing the HMAC from the
//! headers and body it received.
//!
//! # Running Tests
//!
//! ## Mock tests (default, no network required)
//!
//! ```bash
//! cargo test -p paybybank-lib --test upstream_integration
//! ```
//!
//! ## Certification environment tests (requires credentials)
//!
//! These tests are marked `#[ignore]` and need the `integration-tests`
//! feature plus credentials in the environment:
//!
//! ```bash
//! export PBB_API_KEY=...
//! export PBB_API_SECRET=...
//! export PBB_MERCHANT_ID=...
//! cargo test -p paybybank-lib --features integration-tests --test upstream_integration -- --ignored
//! ```

use paybybank_lib::errors::ErrorKind;
use paybybank_lib::health::NOTE_BUSINESS_REJECTION;
use paybybank_lib::signing::compute_signature_raw;
use paybybank_lib::workflow::{
    ChargeRequest, CreateCustomerRequest, NonceInquiryRequest, ProviderCredentialsRequest,
    ProxyRequest, NONCE_UNAVAILABLE_MESSAGE,
};
use paybybank_lib::{Credentials, PayByBank, UpstreamConfig};
use serde_json::{json, Value};
use wiremock::{
    matchers::{header, header_exists, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

fn creds() -> Credentials {
    Credentials::new("k1", "s1", "m1")
}

fn client_for(server: &MockServer) -> PayByBank {
    PayByBank::new(UpstreamConfig::new(server.uri()).with_timeout(5)).unwrap()
}

fn header_value<'a>(request: &'a Request, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {}", name))
        .to_str()
        .unwrap()
}

/// Recompute the signature the way the processor does.
fn assert_signed(request: &Request, api_key: &str, secret: &str) {
    let body = (!request.body.is_empty()).then(|| String::from_utf8(request.body.clone()).unwrap());
    let expected = compute_signature_raw(
        api_key,
        secret,
        header_value(request, "Client-Request-Id"),
        header_value(request, "Timestamp"),
        body.as_deref(),
    );
    assert_eq!(header_value(request, "Authorization"), expected);
    assert_eq!(header_value(request, "Api-Key"), api_key);
    assert_eq!(header_value(request, "Auth-Token-Type"), "HMAC");
}

fn sent_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

// ============================================================================
// Workflow steps
// ============================================================================

#[tokio::test]
async fn test_create_customer_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments-vas/v1/tokens"))
        .and(header("Content-Type", "application/json"))
        .and(header_exists("Client-Request-Id"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"customer": {"providerCustomerId": "pc-9"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .create_customer(&creds(), CreateCustomerRequest::default())
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.http_status, 201);
    assert_eq!(outcome.provider_customer_id.as_deref(), Some("pc-9"));

    let received = server.received_requests().await.unwrap();
    assert_signed(&received[0], "k1", "s1");
    let body = sent_body(&received[0]);
    assert_eq!(body["merchantDetails"]["merchantId"], "m1");
    assert!(body["customer"]["merchantCustomerId"]
        .as_str()
        .unwrap()
        .starts_with("CUST-"));
}

#[tokio::test]
async fn test_provider_credentials_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments-vas/v1/security/provider-credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "providerCredentials": {
                "attributes": [
                    {"key": "publicKey", "value": "pk"},
                    {"key": "configId", "value": "cfg-1"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .provider_credentials(
            &creds(),
            ProviderCredentialsRequest {
                provider_customer_id: Some("pc-9".into()),
                config_id: Some("cfg-1".into()),
            },
        )
        .await;

    assert!(outcome.success);
    let flat = outcome.credentials.unwrap();
    assert_eq!(flat["publicKey"], "pk");
    assert_eq!(flat["configId"], "cfg-1");

    let received = server.received_requests().await.unwrap();
    assert_signed(&received[0], "k1", "s1");
    assert_eq!(
        sent_body(&received[0])["providerCredentials"]["attributes"][2],
        json!({"key": "tokenData", "value": "pc-9"})
    );
}

#[tokio::test]
async fn test_nonce_inquiry_500_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments-vas/v1/tokens"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .nonce_inquiry(&creds(), NonceInquiryRequest::new("n-1"))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.http_status, 500);
    assert_eq!(outcome.message.as_deref(), Some(NONCE_UNAVAILABLE_MESSAGE));
    assert_eq!(outcome.data, json!("Internal Server Error"));
}

#[tokio::test]
async fn test_charge_defaults_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/v1/charges"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"gatewayResponse": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .charge(&creds(), ChargeRequest::default())
        .await;
    assert!(outcome.success);

    let received = server.received_requests().await.unwrap();
    assert_signed(&received[0], "k1", "s1");
    let body = sent_body(&received[0]);
    assert_eq!(body["amount"], json!({"total": 1.0, "currency": "USD"}));
    assert_eq!(body["transactionDetails"]["captureFlag"], true);
}

// ============================================================================
// Probe and proxy
// ============================================================================

#[tokio::test]
async fn test_probe_treats_422_as_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/v1/charges"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": [{"code": "104"}]})),
        )
        .mount(&server)
        .await;

    let report = client_for(&server).test_connection(&creds()).await;

    assert!(report.success);
    assert_eq!(report.http_status, 422);
    assert_eq!(report.note.as_deref(), Some(NOTE_BUSINESS_REJECTION));

    let received = server.received_requests().await.unwrap();
    let body = sent_body(&received[0]);
    assert_eq!(body["amount"]["total"], 0.01);
    assert_eq!(body["transactionDetails"]["captureFlag"], false);
}

#[tokio::test]
async fn test_probe_treats_401_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let report = client_for(&server).test_connection(&creds()).await;

    assert!(!report.success);
    assert_eq!(report.http_status, 401);
    assert_eq!(report.raw_response, Value::Null);
}

#[tokio::test]
async fn test_proxy_get_sends_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/payments-vas/v1/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .proxy(
            &creds(),
            ProxyRequest {
                endpoint: Some("/payments-vas/v1/tokens".into()),
                method: Some("GET".into()),
                payload: None,
            },
        )
        .await;

    assert!(result.success);
    assert_eq!(result.body["ok"], true);

    let received = server.received_requests().await.unwrap();
    assert!(received[0].body.is_empty());
    assert_signed(&received[0], "k1", "s1");
}

#[tokio::test]
async fn test_proxy_post_injects_merchant_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/payments/v1/refunds"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .proxy(
            &creds().with_terminal_id("t1"),
            ProxyRequest {
                endpoint: Some("/payments/v1/refunds".into()),
                method: None,
                payload: Some(json!({"amount": {"total": 3}})),
            },
        )
        .await;
    assert_eq!(result.http_status, 201);

    let received = server.received_requests().await.unwrap();
    assert_signed(&received[0], "k1", "s1");
    assert_eq!(
        sent_body(&received[0])["merchantDetails"],
        json!({"merchantId": "m1", "terminalId": "t1"})
    );
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let no_key = Credentials::new("", "s1", "m1");

    let outcome = client
        .create_customer(&no_key, CreateCustomerRequest::default())
        .await;
    assert_eq!(outcome.error_kind, ErrorKind::Validation);

    let report = client.test_connection(&no_key).await;
    assert!(!report.success);
}

#[tokio::test]
async fn test_slow_processor_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = PayByBank::new(UpstreamConfig::new(server.uri()).with_timeout(1)).unwrap();
    let outcome = client.charge(&creds(), ChargeRequest::default()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.http_status, 0);
    assert_eq!(outcome.error_kind, ErrorKind::Network);
    assert_eq!(outcome.response_status(), 500);
}

// ============================================================================
// Certification environment (opt-in)
// ============================================================================

#[cfg(feature = "integration-tests")]
#[tokio::test]
#[ignore]
async fn test_cert_connectivity_real() {
    let env = |name: &str| std::env::var(name).unwrap_or_default();
    let creds = Credentials::new(
        env("PBB_API_KEY"),
        env("PBB_API_SECRET"),
        env("PBB_MERCHANT_ID"),
    );

    let client = PayByBank::from_env().unwrap();
    let report = client.test_connection(&creds).await;

    println!("probe: {:?} {:?}", report.http_status, report.note);
    assert!(report.success, "credentials rejected: {:?}", report.error_message);
}
