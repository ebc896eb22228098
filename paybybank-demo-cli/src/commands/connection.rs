//! Test-connection command - validate credentials with the probe charge

use anyhow::Result;

use super::Session;
use crate::ui;

pub async fn run(session: &Session) -> Result<bool> {
    let report = session.client.test_connection(&session.credentials).await;

    if session.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.success);
    }

    ui::header("Connection Test");
    if report.success {
        ui::success("Credentials authenticated");
    } else {
        ui::error("Credentials were not accepted");
    }
    ui::key_value("HTTP status", &report.http_status.to_string());
    if let Some(note) = &report.note {
        ui::key_value("Note", note);
    }
    if let Some(message) = &report.error_message {
        ui::key_value("Error", message);
    }
    if let Some(latency) = report.latency_ms {
        ui::key_value("Latency", &format!("{} ms", latency));
    }
    ui::separator();
    ui::json(&report.raw_response);

    Ok(report.success)
}
