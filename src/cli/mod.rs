//! CLI definitions.

pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use signals_config::{load_config, load_config_or_default, AppConfig};
use std::path::{Path, PathBuf};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "signals")]
#[command(author, version, about = "Technical indicators and trading signals from OHLCV data")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Log level (overrides logging.level)
    #[arg(short, long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load settings; only the built-in default path may be missing.
    pub fn load_config(&self) -> Result<AppConfig> {
        let loaded = if self.config == Path::new(DEFAULT_CONFIG) {
            load_config_or_default(&self.config)
        } else {
            load_config(&self.config)
        };
        loaded.with_context(|| format!("Failed to load configuration from {:?}", self.config))
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive a trading signal for each symbol
    Analyze(AnalyzeArgs),
    /// Print indicator values for the most recent rows
    Indicators(IndicatorsArgs),
    /// List available signal policies
    Policies,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbols to analyze (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// CSV file or directory of <SYMBOL>.csv files (overrides data.path)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: Option<String>,

    /// Policy name (overrides policy.name)
    #[arg(short, long)]
    pub policy: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Append each signal to the journal even if journal.enabled is false
    #[arg(long)]
    pub journal: bool,
}

#[derive(clap::Args)]
pub struct IndicatorsArgs {
    /// Symbol to compute
    #[arg(short = 'S', long)]
    pub symbol: String,

    /// CSV file or directory of <SYMBOL>.csv files (overrides data.path)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: Option<String>,

    /// Number of most recent rows to print
    #[arg(short = 'n', long, default_value = "10")]
    pub rows: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}
