//! Recording mock upstream.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::upstream::{HttpMethod, OutboundRequest, Upstream, UpstreamResponse};
use crate::{PayByBankError, Result};

/// A request as the mock received it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Endpoint path.
    pub path: String,
    /// Exact body that would have been sent.
    pub body: Option<String>,
    /// `Client-Request-Id` header.
    pub request_id: String,
    /// `Timestamp` header.
    pub timestamp: String,
    /// `Authorization` header.
    pub signature: String,
    /// All envelope headers in wire order.
    pub headers: Vec<(String, String)>,
}

#[derive(Clone, Debug)]
enum Reply {
    Status(u16, Value),
    Transport,
}

#[derive(Debug, Default)]
struct State {
    requests: Vec<RecordedRequest>,
    script: VecDeque<Reply>,
}

/// Upstream that records every request and answers from a script.
///
/// Scripted replies are consumed in order; the last one repeats once the
/// script is exhausted. Clones share the same recording.
#[derive(Clone, Debug)]
pub struct RecordingUpstream {
    state: Arc<Mutex<State>>,
    fallback: Reply,
}

impl RecordingUpstream {
    /// Always answer with the given status and body.
    ///
    /// Non-2xx statuses are reported as upstream errors, like the HTTP client.
    pub fn responding(status: u16, body: Value) -> Self {
        Self::with_fallback(Reply::Status(status, body))
    }

    /// Always fail as if the connection had been refused.
    pub fn failing_transport() -> Self {
        Self::with_fallback(Reply::Transport)
    }

    fn with_fallback(fallback: Reply) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            fallback,
        }
    }

    /// Queue a one-off answer ahead of the default one.
    pub fn then_respond(self, status: u16, body: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .script
            .push_back(Reply::Status(status, body));
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

#[async_trait]
impl Upstream for RecordingUpstream {
    async fn send(&self, request: OutboundRequest) -> Result<UpstreamResponse> {
        let signed = &request.signed;
        let recorded = RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            body: signed.body().map(str::to_string),
            request_id: signed.request_id().to_string(),
            timestamp: signed.timestamp().to_string(),
            signature: signed.signature().to_string(),
            headers: signed
                .headers()
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        };

        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(recorded);
            state
                .script
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone())
        };

        match reply {
            Reply::Status(status, body) if (200..300).contains(&status) => {
                Ok(UpstreamResponse { status, body })
            }
            Reply::Status(status, body) => Err(PayByBankError::Upstream { status, body }),
            Reply::Transport => Err(PayByBankError::ConnectionFailed {
                target: request.path,
                reason: "connection refused".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::build_headers_at;
    use serde_json::json;

    fn request(path: &str) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Post,
            path: path.to_string(),
            signed: build_headers_at("k1", "s1", Some("{}".to_string()), 1),
        }
    }

    #[tokio::test]
    async fn test_script_then_fallback() {
        let upstream = RecordingUpstream::responding(200, json!({"n": 2}))
            .then_respond(500, json!({"n": 1}));

        let first = upstream.send(request("/a")).await.unwrap_err();
        assert_eq!(first.http_status(), 500);

        let second = upstream.send(request("/b")).await.unwrap();
        assert_eq!(second.body["n"], 2);
        let third = upstream.send(request("/c")).await.unwrap();
        assert_eq!(third.status, 200);

        let paths: Vec<String> = upstream.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/a", "/b", "/c"]);
        assert_eq!(upstream.requests()[0].headers.len(), 6);
    }

    #[tokio::test]
    async fn test_clones_share_recording() {
        let upstream = RecordingUpstream::failing_transport();
        let clone = upstream.clone();

        assert!(clone.send(request("/x")).await.is_err());
        assert_eq!(upstream.call_count(), 1);
    }
}
