//! Indicators command implementation.

use anyhow::Result;
use serde::Serialize;
use signals_config::AppConfig;
use signals_core::types::{PriceSeries, PricePoint};
use signals_indicators::IndicatorSet;
use tracing::info;

use super::{build_engine, data_source, load_series, parse_window};
use crate::cli::{IndicatorsArgs, OutputFormat};

/// One output row: a price point and every indicator at its index.
#[derive(Debug, Serialize)]
struct IndicatorRow {
    date: String,
    close: f64,
    sma: Option<f64>,
    ema: Option<f64>,
    bb_upper: Option<f64>,
    bb_middle: Option<f64>,
    bb_lower: Option<f64>,
    rsi: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    macd_histogram: Option<f64>,
}

impl IndicatorRow {
    fn new(point: &PricePoint, set: &IndicatorSet, i: usize) -> Self {
        let date = point
            .datetime()
            .map_or_else(|| point.timestamp.to_string(), |dt| dt.format("%Y-%m-%d").to_string());
        let band = set.bollinger[i];
        let macd = set.macd[i];
        Self {
            date,
            close: point.close,
            sma: set.sma[i],
            ema: set.ema[i],
            bb_upper: band.map(|b| b.upper),
            bb_middle: band.map(|b| b.middle),
            bb_lower: band.map(|b| b.lower),
            rsi: set.rsi[i],
            macd: macd.map(|m| m.macd),
            macd_signal: macd.and_then(|m| m.signal),
            macd_histogram: macd.and_then(|m| m.histogram),
        }
    }
}

/// The last `count` rows of `series`, oldest first.
fn tail_rows(series: &PriceSeries, set: &IndicatorSet, count: usize) -> Vec<IndicatorRow> {
    let skip = series.len().saturating_sub(count);
    series
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, point)| IndicatorRow::new(point, set, i))
        .collect()
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

pub async fn run(args: IndicatorsArgs, config: &AppConfig) -> Result<()> {
    let engine = build_engine(config)?;
    let source = data_source(args.data.as_deref(), config)?;
    let window = parse_window(args.start.as_deref(), args.end.as_deref())?;
    let series = load_series(&source, &args.symbol, window).await?;

    let set = engine.compute(&series.closes());
    let rows = tail_rows(&series, &set, args.rows);
    info!(symbol = %args.symbol, points = series.len(), "Indicators computed");

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            println!(
                "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>10} {:>10} {:>10}",
                "date", "close", "sma", "ema", "bb_upper", "bb_mid", "bb_lower", "rsi", "macd",
                "signal", "hist"
            );
            for row in &rows {
                println!(
                    "{:<10} {:>10.4} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>10} {:>10} {:>10}",
                    row.date,
                    row.close,
                    cell(row.sma),
                    cell(row.ema),
                    cell(row.bb_upper),
                    cell(row.bb_middle),
                    cell(row.bb_lower),
                    row.rsi.map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
                    cell(row.macd),
                    cell(row.macd_signal),
                    cell(row.macd_histogram),
                );
            }
        }
    }

    Ok(())
}
