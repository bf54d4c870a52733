//! CLI command implementations.

pub mod analyze;
pub mod indicators;
pub mod policies;
pub mod validate;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use signals_config::AppConfig;
use signals_core::traits::DataSource;
use signals_core::types::{DateWindow, PriceSeries};
use signals_data::CsvDataSource;
use signals_indicators::IndicatorEngine;
use std::path::{Path, PathBuf};

fn parse_date(value: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{value}', expected YYYY-MM-DD"))?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
    } else {
        NaiveTime::MIN
    };
    Ok(date.and_time(time).and_utc())
}

/// Inclusive date window from optional `YYYY-MM-DD` bounds.
pub(crate) fn parse_window(start: Option<&str>, end: Option<&str>) -> Result<DateWindow> {
    let window = DateWindow {
        start: start.map(|s| parse_date(s, false)).transpose()?,
        end: end.map(|e| parse_date(e, true)).transpose()?,
    };
    if let (Some(start), Some(end)) = (window.start, window.end) {
        if start > end {
            anyhow::bail!("Start date {start} is after end date {end}");
        }
    }
    Ok(window)
}

/// CSV source from `--data`, falling back to `data.path`.
pub(crate) fn data_source(data: Option<&Path>, config: &AppConfig) -> Result<CsvDataSource> {
    let path = data.map_or_else(|| PathBuf::from(&config.data.path), Path::to_path_buf);
    CsvDataSource::new(&path).with_context(|| {
        format!(
            "Data path '{}' does not exist. Provide a CSV file or directory containing CSV files (e.g. --data ./data)",
            path.display()
        )
    })
}

pub(crate) async fn load_series(
    source: &CsvDataSource,
    symbol: &str,
    window: DateWindow,
) -> Result<PriceSeries> {
    source
        .fetch_series(symbol, window)
        .await
        .with_context(|| format!("Failed to load price data for {symbol}"))
}

pub(crate) fn build_engine(config: &AppConfig) -> Result<IndicatorEngine> {
    IndicatorEngine::new(config.indicators.clone()).context("Invalid indicator configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window() {
        let window = parse_window(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        let start = window.start.unwrap();
        let end = window.end.unwrap();

        assert_eq!(start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(window.contains(end.timestamp_millis()));
        assert!(!window.contains(end.timestamp_millis() + 1));

        assert_eq!(parse_window(None, None).unwrap(), DateWindow::all());
    }

    #[test]
    fn test_parse_window_errors() {
        assert!(parse_window(Some("01/02/2024"), None).is_err());
        assert!(parse_window(Some("2024-02-01"), Some("2024-01-01")).is_err());
    }
}
