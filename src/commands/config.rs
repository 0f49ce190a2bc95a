//! Config command handler: show effective configuration.

use anyhow::Result;

use crate::app_config::{LoadedConfig, ResolvedSettings};

pub fn run_config_show_command(loaded: &LoadedConfig, settings: &ResolvedSettings) -> Result<()> {
    let resolved_path = loaded.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded.loaded_from_file() {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!(
        "catalog = {}",
        settings
            .catalog
            .as_ref()
            .map_or_else(|| "<built-in>".to_string(), |path| path.display().to_string())
    );
    println!(
        "tick_interval_ms = {}",
        settings.timing.tick_interval.as_millis()
    );
    println!(
        "settle_delay_ms = {}",
        settings.timing.settle_delay.as_millis()
    );
    println!("open_externally = {}", settings.open_externally);
    println!("log_level = {}", settings.log_level);
    Ok(())
}
