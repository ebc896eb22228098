//! Proxy command - signed passthrough to any endpoint

use anyhow::Result;
use paybybank_lib::workflow::ProxyRequest;
use paybybank_lib::StepOutcome;

use super::{parse_json_arg, Session};

pub async fn run(
    session: &Session,
    endpoint: Option<String>,
    method: String,
    payload: Option<String>,
) -> Result<bool> {
    let request = ProxyRequest {
        endpoint,
        method: Some(method),
        payload: parse_json_arg("payload", payload)?,
    };

    let result = session.client.proxy(&session.credentials, request).await;
    session.report("Proxy", &StepOutcome::from(result))
}
