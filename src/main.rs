//! Trading-signal CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use signals_monitor::setup_logging;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // Setup logging
    let log_level = cli
        .log_level
        .map_or(config.logging.level.as_str(), |l| l.as_str());
    let json_logs = cli.json_logs || config.logging.format.eq_ignore_ascii_case("json");
    let _log_guard = setup_logging(
        log_level,
        json_logs,
        config.logging.file.as_deref().map(Path::new),
    )?;

    // Execute command
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Indicators(args) => cli::commands::indicators::run(args, &config).await,
        Commands::Policies => cli::commands::policies::run(&config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
    }
}
