//! Health command - show that the service is running

use anyhow::Result;
use paybybank_lib::service_health;

use crate::ui;

pub fn run(json: bool) -> Result<()> {
    let health = service_health();

    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        ui::success(&format!("Status: {}", health.status));
        ui::key_value("Time", &health.time);
    }

    Ok(())
}
