//! Validate configuration command.

use anyhow::{Context, Result};
use signals_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {config_path:?}");

    if let Err(e) = config.validate() {
        println!("Configuration error: {e}");
        return Err(e).context("Configuration is invalid");
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Policy: {}", config.policy.name);
    println!(
        "MACD: {}/{}/{} ({:?} signal line)",
        config.indicators.fast_period,
        config.indicators.slow_period,
        config.indicators.signal_period,
        config.indicators.signal_line
    );
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
