//! Checkout Flow Example
//!
//! This example walks the four Pay-by-Bank steps against the processor:
//! - Create a customer profile
//! - Fetch provider credentials for the client-side SDK
//! - Detokenize the nonce the SDK produced
//! - Charge the customer
//!
//! # Usage
//!
//! ```bash
//! export PBB_API_KEY=... PBB_API_SECRET=... PBB_MERCHANT_ID=...
//! cargo run --example checkout_flow -- <nonce>
//! ```
//!
//! Without a nonce argument the flow stops after step 2, which is where a
//! browser would hand control to the SDK.

use paybybank_lib::prelude::*;

fn env(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn print_outcome(step: &str, outcome: &StepOutcome) {
    let status = if outcome.success { "ok" } else { "failed" };
    println!("[{}] {} (HTTP {})", step, status, outcome.http_status);
    if let Some(message) = &outcome.message {
        println!("    {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut creds = Credentials::new(
        env("PBB_API_KEY"),
        env("PBB_API_SECRET"),
        env("PBB_MERCHANT_ID"),
    );
    if let Ok(terminal_id) = std::env::var("PBB_TERMINAL_ID") {
        creds = creds.with_terminal_id(terminal_id);
    }
    let client = PayByBank::from_env()?;

    let report = client.test_connection(&creds).await;
    println!(
        "[probe] success={} note={:?}",
        report.success,
        report.note.as_deref().unwrap_or("-")
    );
    if !report.success {
        return Ok(());
    }

    let customer = client
        .create_customer(&creds, CreateCustomerRequest::default())
        .await;
    print_outcome("create-customer", &customer);
    if !customer.success {
        return Ok(());
    }

    let session = client
        .provider_credentials(
            &creds,
            ProviderCredentialsRequest {
                provider_customer_id: customer.provider_customer_id.clone(),
                config_id: None,
            },
        )
        .await;
    print_outcome("provider-credentials", &session);
    if let Some(attributes) = &session.credentials {
        for key in attributes.keys() {
            println!("    attribute: {}", key);
        }
    }

    let Some(nonce) = std::env::args().nth(1) else {
        println!("No nonce given; stopping before detokenization.");
        return Ok(());
    };

    let token = client
        .nonce_inquiry(
            &creds,
            NonceInquiryRequest {
                nonce,
                merchant_customer_id: customer.merchant_customer_id.clone(),
                provider_customer_id: customer.provider_customer_id.clone(),
            },
        )
        .await;
    print_outcome("nonce-inquiry", &token);

    let charge = client
        .charge(
            &creds,
            ChargeRequest {
                amount: Some(1.00),
                provider_customer_id: customer.provider_customer_id,
                ..ChargeRequest::default()
            },
        )
        .await;
    print_outcome("charge", &charge);

    Ok(())
}
