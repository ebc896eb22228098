//! Signed passthrough to arbitrary processor endpoints.
//!
//! The proxy applies the same signing envelope as the workflow steps but
//! builds nothing itself: the caller's payload is forwarded as given, with
//! one convenience. When the payload is a JSON object without
//! `merchantDetails` and the credentials carry a merchant id, the merchant
//! block is injected before signing.

use serde_json::Value;

use crate::client::PayByBank;
use crate::credentials::{Credentials, Requirement};
use crate::protocol::{validate_endpoint_path, CHARGES_PATH};
use crate::upstream::{HttpMethod, Upstream, UpstreamResponse, UpstreamResult};
use crate::workflow::payloads::MerchantDetails;
use crate::workflow::{PayloadEnvelope, ProxyRequest};
use crate::Result;

const MERCHANT_DETAILS_KEY: &str = "merchantDetails";

/// Prepare the payload the proxy signs.
///
/// A missing payload becomes `{}`. Non-object payloads pass through as-is.
pub fn proxy_payload(credentials: &Credentials, payload: Option<Value>) -> Result<Value> {
    let mut payload = payload.unwrap_or_else(|| Value::Object(Default::default()));

    if let (Value::Object(map), Some(_)) = (&mut payload, credentials.merchant_id()) {
        let missing = map
            .get(MERCHANT_DETAILS_KEY)
            .map_or(true, Value::is_null);
        if missing {
            let details = serde_json::to_value(MerchantDetails::from_credentials(credentials))?;
            map.insert(MERCHANT_DETAILS_KEY.to_string(), details);
        }
    }

    Ok(payload)
}

impl<U: Upstream> PayByBank<U> {
    /// Forward a signed request to any processor endpoint.
    ///
    /// `GET` requests are signed without a body component and sent without
    /// a body. The processor's answer is returned verbatim.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn proxy(&self, credentials: &Credentials, request: ProxyRequest) -> UpstreamResult {
        self.try_proxy(credentials, request).await.into()
    }

    async fn try_proxy(
        &self,
        credentials: &Credentials,
        request: ProxyRequest,
    ) -> Result<UpstreamResponse> {
        credentials.validate(Requirement::KeyAndSecret)?;

        let path = match request.endpoint.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => validate_endpoint_path(path)?.to_string(),
            _ => CHARGES_PATH.to_string(),
        };
        let method = match request.method.as_deref().map(str::trim) {
            Some(method) if !method.is_empty() => method.parse::<HttpMethod>()?,
            _ => HttpMethod::default(),
        };

        match method {
            HttpMethod::Get => self.call(credentials, method, &path, None).await,
            HttpMethod::Post => {
                let payload = PayloadEnvelope::GenericPayload(proxy_payload(
                    credentials,
                    request.payload,
                )?);
                self.call(credentials, method, &path, Some(&payload)).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::signing::compute_signature_raw;
    use crate::test_utils::RecordingUpstream;
    use serde_json::json;

    #[test]
    fn test_payload_injection() {
        let creds = Credentials::new("k1", "s1", "m1");

        assert_eq!(
            proxy_payload(&creds, None).unwrap(),
            json!({"merchantDetails": {"merchantId": "m1"}})
        );
        assert_eq!(
            proxy_payload(&creds, Some(json!({"merchantDetails": null}))).unwrap(),
            json!({"merchantDetails": {"merchantId": "m1"}})
        );

        let own = json!({"merchantDetails": {"merchantId": "other"}});
        assert_eq!(proxy_payload(&creds, Some(own.clone())).unwrap(), own);

        assert_eq!(proxy_payload(&creds, Some(json!([1, 2]))).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_no_injection_without_merchant_id() {
        let creds = Credentials::new("k1", "s1", "");
        assert_eq!(proxy_payload(&creds, None).unwrap(), json!({}));
    }

    #[test]
    fn test_injected_block_keeps_caller_key_order() {
        let creds = Credentials::new("k1", "s1", "m1");
        let payload = proxy_payload(&creds, Some(json!({"zeta": 1, "alpha": 2}))).unwrap();
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"zeta":1,"alpha":2,"merchantDetails":{"merchantId":"m1"}}"#
        );
    }

    #[tokio::test]
    async fn test_serialized_result_carries_success() {
        let upstream = RecordingUpstream::responding(200, json!({"ok": 1}));
        let client = PayByBank::with_upstream(upstream);
        let creds = Credentials::new("k1", "s1", "m1");

        let result = client.proxy(&creds, ProxyRequest::default()).await;
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["httpStatus"], 200);
        assert_eq!(value["body"], json!({"ok": 1}));

        let rejected = client
            .proxy(&Credentials::new("", "s1", "m1"), ProxyRequest::default())
            .await;
        let value = serde_json::to_value(&rejected).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["httpStatus"], 0);
        assert_eq!(value["errorKind"], "validation");
    }

    #[tokio::test]
    async fn test_get_signs_without_body() {
        let upstream = RecordingUpstream::responding(200, json!({"items": []}));
        let client = PayByBank::with_upstream(upstream.clone());
        let creds = Credentials::new("k1", "s1", "m1");

        let result = client
            .proxy(
                &creds,
                ProxyRequest {
                    endpoint: Some("/payments-vas/v1/tokens".into()),
                    method: Some("get".into()),
                    payload: Some(json!({"ignored": true})),
                },
            )
            .await;

        assert!(result.success);
        assert_eq!(result.body["items"], json!([]));

        let recorded = &upstream.requests()[0];
        assert_eq!(recorded.method, HttpMethod::Get);
        assert_eq!(recorded.body, None);
        assert_eq!(
            recorded.signature,
            compute_signature_raw("k1", "s1", &recorded.request_id, &recorded.timestamp, None)
        );
    }

    #[tokio::test]
    async fn test_post_signs_serialized_payload() {
        let upstream = RecordingUpstream::responding(201, json!({}));
        let client = PayByBank::with_upstream(upstream.clone());
        let creds = Credentials::new("k1", "s1", "");

        let result = client
            .proxy(
                &creds,
                ProxyRequest {
                    payload: Some(json!({"amount": {"total": 2}})),
                    ..ProxyRequest::default()
                },
            )
            .await;

        assert_eq!(result.http_status, 201);
        let recorded = &upstream.requests()[0];
        assert_eq!(recorded.method, HttpMethod::Post);
        assert_eq!(recorded.path, CHARGES_PATH);
        assert_eq!(recorded.body.as_deref(), Some(r#"{"amount":{"total":2}}"#));
        assert_eq!(
            recorded.signature,
            compute_signature_raw(
                "k1",
                "s1",
                &recorded.request_id,
                &recorded.timestamp,
                Some(r#"{"amount":{"total":2}}"#),
            )
        );
    }

    #[tokio::test]
    async fn test_rejects_bad_method_and_path_without_sending() {
        let upstream = RecordingUpstream::responding(200, json!({}));
        let client = PayByBank::with_upstream(upstream.clone());
        let creds = Credentials::new("k1", "s1", "m1");

        let result = client
            .proxy(
                &creds,
                ProxyRequest {
                    method: Some("DELETE".into()),
                    ..ProxyRequest::default()
                },
            )
            .await;
        assert_eq!(result.error_kind, ErrorKind::Validation);

        let result = client
            .proxy(
                &creds,
                ProxyRequest {
                    endpoint: Some("/payments/../admin".into()),
                    ..ProxyRequest::default()
                },
            )
            .await;
        assert_eq!(result.response_status(), 400);

        let result = client
            .proxy(&Credentials::new("", "s1", "m1"), ProxyRequest::default())
            .await;
        assert_eq!(result.error_kind, ErrorKind::Validation);

        assert_eq!(upstream.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_error_forwarded_verbatim() {
        let upstream = RecordingUpstream::responding(404, json!({"message": "no route"}));
        let client = PayByBank::with_upstream(upstream);
        let creds = Credentials::new("k1", "s1", "m1");

        let result = client.proxy(&creds, ProxyRequest::default()).await;

        assert!(!result.success);
        assert_eq!(result.http_status, 404);
        assert_eq!(result.body, json!({"message": "no route"}));
    }
}
