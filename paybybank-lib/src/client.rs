//! The Pay-by-Bank client.
//!
//! [`PayByBank`] owns an [`Upstream`] and nothing else. Every operation takes
//! the caller's [`Credentials`] by reference, signs exactly one request and
//! returns a structured result, so a single client can serve any number of
//! concurrent callers with different credentials.

use crate::credentials::Credentials;
use crate::signing::build_headers;
use crate::upstream::{
    HttpMethod, HttpUpstream, OutboundRequest, Upstream, UpstreamConfig, UpstreamResponse,
};
use crate::workflow::{PayloadEnvelope, StepOutcome, WorkflowRequest};
use crate::Result;

/// Stateless client for the processor's Pay-by-Bank workflow.
///
/// # Example
///
/// ```rust,ignore
/// use paybybank_lib::prelude::*;
///
/// let client = PayByBank::new(UpstreamConfig::cert())?;
/// let creds = Credentials::new("api-key", "api-secret", "merchant-1");
///
/// let outcome = client.create_customer(&creds, CreateCustomerRequest::default()).await;
/// if outcome.success {
///     println!("provider customer: {:?}", outcome.provider_customer_id);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct PayByBank<U = HttpUpstream> {
    upstream: U,
}

impl PayByBank<HttpUpstream> {
    /// Create a client talking HTTP to the configured processor.
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        Ok(Self::with_upstream(HttpUpstream::new(config)?))
    }

    /// Create a client for the certification environment.
    pub fn cert() -> Result<Self> {
        Self::new(UpstreamConfig::cert())
    }

    /// Create a client configured from `PBB_BASE_URL` / `PBB_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::new(UpstreamConfig::from_env())
    }
}

impl<U: Upstream> PayByBank<U> {
    /// Create a client over any upstream implementation.
    pub fn with_upstream(upstream: U) -> Self {
        Self { upstream }
    }

    /// Get the upstream.
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Run any operation described by a tagged request.
    pub async fn execute(&self, credentials: &Credentials, request: WorkflowRequest) -> StepOutcome {
        match request {
            WorkflowRequest::TestConnection => self.test_connection(credentials).await.into(),
            WorkflowRequest::CreateCustomer(req) => self.create_customer(credentials, req).await,
            WorkflowRequest::ProviderCredentials(req) => {
                self.provider_credentials(credentials, req).await
            }
            WorkflowRequest::NonceInquiry(req) => self.nonce_inquiry(credentials, req).await,
            WorkflowRequest::Charge(req) => self.charge(credentials, req).await,
            WorkflowRequest::Proxy(req) => self.proxy(credentials, req).await.into(),
        }
    }

    /// Sign and send one request.
    ///
    /// The payload is serialized once; the signed string is the body sent.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self, credentials, payload),
            fields(payload = payload.map(PayloadEnvelope::kind).unwrap_or("none"))
        )
    )]
    pub(crate) async fn call(
        &self,
        credentials: &Credentials,
        method: HttpMethod,
        path: &str,
        payload: Option<&PayloadEnvelope>,
    ) -> Result<UpstreamResponse> {
        let signed = build_headers(&credentials.api_key, &credentials.api_secret, payload)?;
        let request = OutboundRequest {
            method,
            path: path.to_string(),
            signed,
        };

        let result = self.upstream.send(request).await;

        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::warn!(
                status = err.http_status(),
                kind = ?err.kind(),
                "processor call failed: {}",
                err
            );
        }

        result
    }
}
