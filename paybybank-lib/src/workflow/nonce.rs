//! Step 3: nonce detokenization.

use super::payloads::{CustomerRef, MerchantDetails, TokenInquiryPayload, TokenSource};
use super::{NonceInquiryRequest, PayloadEnvelope, StepOutcome};
use crate::client::PayByBank;
use crate::credentials::{Credentials, Requirement};
use crate::protocol::TOKENS_PATH;
use crate::upstream::{HttpMethod, Upstream};
use crate::PayByBankError;

/// Message used when the processor answers a nonce inquiry with a 500.
pub const NONCE_UNAVAILABLE_MESSAGE: &str =
    "processor returned 500: the nonce inquiry endpoint may be unavailable in this environment";

/// Build the nonce-inquiry payload.
pub fn token_inquiry_payload(
    credentials: &Credentials,
    request: &NonceInquiryRequest,
) -> TokenInquiryPayload {
    TokenInquiryPayload {
        source: TokenSource::pay_by_bank(request.nonce.trim()),
        merchant_details: MerchantDetails::from_credentials(credentials),
        customer: CustomerRef::from_ids(
            request.merchant_customer_id.as_deref(),
            request.provider_customer_id.as_deref(),
        ),
    }
}

impl<U: Upstream> PayByBank<U> {
    /// Exchange a client-side nonce for its token data.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn nonce_inquiry(
        &self,
        credentials: &Credentials,
        request: NonceInquiryRequest,
    ) -> StepOutcome {
        if let Err(err) = credentials.validate(Requirement::WithMerchant) {
            return StepOutcome::failed(&err);
        }
        if request.nonce.trim().is_empty() {
            return StepOutcome::failed(&PayByBankError::validation("nonce is required"));
        }

        let payload: PayloadEnvelope = token_inquiry_payload(credentials, &request).into();
        match self
            .call(credentials, HttpMethod::Post, TOKENS_PATH, Some(&payload))
            .await
        {
            Ok(response) => {
                let token_data = response
                    .body
                    .pointer("/source/tokenData")
                    .filter(|v| !v.is_null())
                    .cloned();
                let mut outcome = StepOutcome::succeeded(response);
                outcome.token_data = token_data;
                outcome
            }
            Err(err @ PayByBankError::Upstream { status: 500, .. }) => {
                StepOutcome::failed(&err).with_message(NONCE_UNAVAILABLE_MESSAGE)
            }
            Err(err) => StepOutcome::failed(&err),
        }
    }
}
