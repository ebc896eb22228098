//! Command implementations

pub mod connection;
pub mod health;
pub mod proxy;
pub mod workflow;

use anyhow::{Context, Result};
use paybybank_lib::{Credentials, PayByBank, StepOutcome, UpstreamConfig};

use crate::ui;
use crate::ConnectionArgs;

/// Client and credentials shared by every command of one invocation.
pub struct Session {
    pub client: PayByBank,
    pub credentials: Credentials,
    pub json: bool,
}

impl Session {
    pub fn new(args: &ConnectionArgs, json: bool) -> Result<Self> {
        let mut config = args
            .base_url
            .clone()
            .map(UpstreamConfig::new)
            .unwrap_or_else(UpstreamConfig::cert);
        if let Some(secs) = args.timeout {
            config = config.with_timeout(secs);
        }
        tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "using processor");

        let client = PayByBank::new(config).context("Failed to create processor client")?;

        // Missing values stay empty so the library reports them.
        let mut credentials = Credentials::new(
            args.api_key.clone().unwrap_or_default(),
            args.api_secret.clone().unwrap_or_default(),
            args.merchant_id.clone().unwrap_or_default(),
        );
        if let Some(terminal_id) = &args.terminal_id {
            credentials = credentials.with_terminal_id(terminal_id.clone());
        }

        Ok(Self {
            client,
            credentials,
            json,
        })
    }

    /// Print an outcome and return whether it succeeded.
    pub fn report(&self, title: &str, outcome: &StepOutcome) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(outcome)?);
            return Ok(outcome.success);
        }

        ui::header(title);
        if outcome.success {
            ui::success(&format!("HTTP {}", outcome.http_status));
        } else {
            ui::error(&format!(
                "HTTP {} ({:?})",
                outcome.http_status, outcome.error_kind
            ));
        }
        if let Some(message) = &outcome.message {
            ui::key_value("Message", message);
        }
        if let Some(note) = &outcome.note {
            ui::key_value("Note", note);
        }
        if let Some(id) = &outcome.merchant_customer_id {
            ui::key_value("Merchant customer id", id);
        }
        if let Some(id) = &outcome.provider_customer_id {
            ui::key_value("Provider customer id", id);
        }
        if let Some(token_data) = &outcome.token_data {
            ui::key_value("Token data", &token_data.to_string());
        }
        if let Some(credentials) = &outcome.credentials {
            for (key, value) in credentials {
                ui::key_value(key, &ui::display_value(value));
            }
        }

        ui::separator();
        ui::json(&outcome.data);
        Ok(outcome.success)
    }
}

/// Parse an optional JSON argument.
pub fn parse_json_arg(name: &str, raw: Option<String>) -> Result<Option<serde_json::Value>> {
    raw.map(|text| {
        serde_json::from_str(&text).with_context(|| format!("--{} is not valid JSON", name))
    })
    .transpose()
}
