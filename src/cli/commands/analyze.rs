//! Analyze command implementation.

use anyhow::{Context, Result};
use signals_config::AppConfig;
use signals_core::error::PolicyError;
use signals_core::traits::EventSink;
use signals_core::types::{PriceSeries, TradingSignal};
use signals_data::CsvJournal;
use signals_indicators::IndicatorEngine;
use signals_policy::{PolicyRegistry, SignalPipeline};
use tracing::{info, warn};

use super::{build_engine, data_source, load_series, parse_window};
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let signals = derive_signals(&args, config).await?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&signals)?),
        OutputFormat::Text => {
            for signal in &signals {
                println!("{}", render(signal));
            }
        }
    }

    if args.journal || config.journal.enabled {
        let mut journal = CsvJournal::open(&config.journal.path)
            .with_context(|| format!("Failed to open journal {}", config.journal.path))?;
        for signal in &signals {
            journal.record(signal)?;
        }
        journal.flush()?;
        info!(
            count = signals.len(),
            path = %config.journal.path,
            "Signals journaled"
        );
    }

    Ok(())
}

/// One signal per symbol. Symbols without usable data are logged and skipped;
/// an inconsistent policy decision aborts the run.
async fn derive_signals(args: &AnalyzeArgs, config: &AppConfig) -> Result<Vec<TradingSignal>> {
    let policy_name = args.policy.as_deref().unwrap_or(&config.policy.name);
    let registry = PolicyRegistry::new();
    let policy = registry
        .create(policy_name, config.policy.config_for(policy_name)?)
        .with_context(|| format!("Failed to create policy '{policy_name}'"))?;
    let pipeline = SignalPipeline::new(policy);

    let engine = build_engine(config)?;
    let source = data_source(args.data.as_deref(), config)?;
    let window = parse_window(args.start.as_deref(), args.end.as_deref())?;

    info!(
        policy = policy_name,
        symbols = args.symbols.len(),
        "Starting analysis"
    );

    let mut signals = Vec::with_capacity(args.symbols.len());
    for symbol in &args.symbols {
        let series = match load_series(&source, symbol, window).await {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol = %symbol, "Skipping symbol: {e:#}");
                continue;
            }
        };
        if series.len() < engine.warmup() {
            warn!(
                symbol = %symbol,
                points = series.len(),
                warmup = engine.warmup(),
                "Series shorter than indicator warm-up; some indicators are undefined"
            );
        }
        if let Some(signal) = signal_for(&pipeline, &engine, &series)? {
            signals.push(signal);
        }
    }

    if signals.is_empty() {
        anyhow::bail!("No signals derived for {}", args.symbols.join(", "));
    }
    Ok(signals)
}

fn signal_for(
    pipeline: &SignalPipeline,
    engine: &IndicatorEngine,
    series: &PriceSeries,
) -> Result<Option<TradingSignal>> {
    match pipeline.analyze(engine, series) {
        Ok(signal) => {
            info!(
                symbol = %series.symbol,
                position = %signal.position,
                confidence = signal.confidence,
                "Signal derived"
            );
            Ok(Some(signal))
        }
        Err(PolicyError::InsufficientData(reason)) => {
            warn!(symbol = %series.symbol, "No signal: {reason}");
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Policy failed for {}", series.symbol)),
    }
}

fn render(signal: &TradingSignal) -> String {
    format!(
        "{:<8} {:<5}  entry {:>10.4}  target {:>10.4}  stop {:>10.4}  R:R {:.2}  confidence {:>2}/10  [{}]\n         {}",
        signal.asset,
        signal.position.to_string().to_uppercase(),
        signal.entry,
        signal.target,
        signal.stop_loss,
        signal.reward_to_risk(),
        signal.confidence,
        signal.policy,
        signal.rationale
    )
}
