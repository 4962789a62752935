use crate::config::AuditConfig;
use anyhow::{Context, Result};

/// Print the effective configuration after all layers are merged
pub fn execute(config: &AuditConfig) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
    println!("{rendered}");
    println!("effective workers: {}", config.effective_workers());
    Ok(())
}
