//! Step 4: charge.

use serde_json::{json, Value};

use super::payloads::{
    ChargeAmount, ChargePayload, ChargeTransactionDetails, CustomerRef, MerchantDetails,
    TransactionInteraction,
};
use super::{ChargeRequest, PayloadEnvelope, StepOutcome};
use crate::client::PayByBank;
use crate::credentials::{Credentials, Requirement};
use crate::protocol::{CHARGES_PATH, SOURCE_TYPE_PAYMENT_TOKEN, TOKEN_PROVIDER};
use crate::upstream::{HttpMethod, Upstream};

/// Total charged when the caller gives no usable amount.
pub const DEFAULT_CHARGE_TOTAL: f64 = 1.00;

/// Source used when the caller supplies none.
pub fn default_charge_source() -> Value {
    json!({
        "sourceType": SOURCE_TYPE_PAYMENT_TOKEN,
        "tokenSource": TOKEN_PROVIDER,
    })
}

/// Resolve the charged total.
///
/// Missing, zero and non-finite amounts fall back to
/// [`DEFAULT_CHARGE_TOTAL`]. Anything else, negatives included, is sent
/// unchanged and left for the processor to judge.
pub fn charge_total(amount: Option<f64>) -> f64 {
    match amount {
        Some(total) if total.is_finite() && total != 0.0 => total,
        _ => DEFAULT_CHARGE_TOTAL,
    }
}

/// Build the charge payload.
pub fn charge_payload(credentials: &Credentials, request: ChargeRequest) -> ChargePayload {
    ChargePayload {
        amount: ChargeAmount::usd(charge_total(request.amount)),
        source: request
            .source
            .filter(|s| !s.is_null())
            .unwrap_or_else(default_charge_source),
        transaction_details: ChargeTransactionDetails {
            capture_flag: request.capture_flag != Some(false),
        },
        merchant_details: MerchantDetails::from_credentials(credentials),
        transaction_interaction: Some(TransactionInteraction::ecom()),
        customer: CustomerRef::from_ids(
            request.merchant_customer_id.as_deref(),
            request.provider_customer_id.as_deref(),
        ),
    }
}

impl<U: Upstream> PayByBank<U> {
    /// Submit a charge. The processor's answer is returned verbatim.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn charge(&self, credentials: &Credentials, request: ChargeRequest) -> StepOutcome {
        if let Err(err) = credentials.validate(Requirement::WithMerchant) {
            return StepOutcome::failed(&err);
        }

        let payload: PayloadEnvelope = charge_payload(credentials, request).into();
        self.call(credentials, HttpMethod::Post, CHARGES_PATH, Some(&payload))
            .await
            .into()
    }
}
