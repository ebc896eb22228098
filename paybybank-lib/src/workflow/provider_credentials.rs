//! Step 2: provider credentials for the client-side SDK.

use serde_json::{Map, Value};

use super::payloads::{
    CredentialAttribute, MerchantDetails, ProviderCredentials, ProviderCredentialsPayload,
};
use super::{PayloadEnvelope, ProviderCredentialsRequest, StepOutcome};
use crate::client::PayByBank;
use crate::credentials::{Credentials, Requirement};
use crate::protocol::{PROVIDER_CREDENTIALS_PATH, TOKEN_PROVIDER};
use crate::upstream::{HttpMethod, Upstream};

/// Build the provider-credentials payload.
///
/// The attribute list always requests the public key and the config id;
/// `tokenData` and `configId` follow when supplied.
pub fn provider_credentials_payload(
    credentials: &Credentials,
    request: &ProviderCredentialsRequest,
) -> ProviderCredentialsPayload {
    let mut attributes = vec![
        CredentialAttribute::new("publicKeyRequired", "true"),
        CredentialAttribute::new("configIdRequired", "true"),
    ];
    if let Some(id) = non_blank(request.provider_customer_id.as_deref()) {
        attributes.push(CredentialAttribute::new("tokenData", id));
    }
    if let Some(config_id) = non_blank(request.config_id.as_deref()) {
        attributes.push(CredentialAttribute::new("configId", config_id));
    }

    ProviderCredentialsPayload {
        provider_credentials: ProviderCredentials {
            credential_type: TOKEN_PROVIDER.to_string(),
            attributes,
        },
        merchant_details: MerchantDetails::from_credentials(credentials),
    }
}

/// Flatten `providerCredentials.attributes` into a key/value map.
///
/// Later duplicates overwrite earlier ones. Entries without a string key are
/// skipped.
pub fn flatten_attributes(body: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    let Some(attributes) = body
        .pointer("/providerCredentials/attributes")
        .and_then(Value::as_array)
    else {
        return flat;
    };

    for attribute in attributes {
        if let Some(key) = attribute.get("key").and_then(Value::as_str) {
            let value = attribute.get("value").cloned().unwrap_or(Value::Null);
            flat.insert(key.to_string(), value);
        }
    }
    flat
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl<U: Upstream> PayByBank<U> {
    /// Fetch the session credentials the client-side SDK needs.
    ///
    /// A successful outcome always carries `credentials`, empty when the
    /// processor returned no attributes.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn provider_credentials(
        &self,
        credentials: &Credentials,
        request: ProviderCredentialsRequest,
    ) -> StepOutcome {
        if let Err(err) = credentials.validate(Requirement::WithMerchant) {
            return StepOutcome::failed(&err);
        }

        let payload: PayloadEnvelope =
            provider_credentials_payload(credentials, &request).into();
        match self
            .call(
                credentials,
                HttpMethod::Post,
                PROVIDER_CREDENTIALS_PATH,
                Some(&payload),
            )
            .await
        {
            Ok(response) => {
                let flat = flatten_attributes(&response.body);
                let mut outcome = StepOutcome::succeeded(response);
                outcome.credentials = Some(flat);
                outcome
            }
            Err(err) => StepOutcome::failed(&err),
        }
    }
}
