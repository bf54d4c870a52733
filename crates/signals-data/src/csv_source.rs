//! CSV data source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use signals_core::error::DataError;
use signals_core::traits::DataSource;
use signals_core::types::{DateWindow, PricePoint, PriceSeries};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Where the CSV files live.
#[derive(Debug, Clone)]
enum Location {
    /// One file serves every symbol
    File(PathBuf),
    /// `<dir>/<SYMBOL>.csv` per symbol
    Directory(PathBuf),
}

/// CSV data source for historical data.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    location: Location,
}

impl CsvDataSource {
    /// Create a new CSV data source from a file or a directory of `<SYMBOL>.csv` files.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let location = if path.is_dir() {
            Location::Directory(path.to_path_buf())
        } else if path.is_file() {
            Location::File(path.to_path_buf())
        } else {
            return Err(DataError::NotFound(path.display().to_string()));
        };
        Ok(Self { location })
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        match &self.location {
            Location::File(path) => path.clone(),
            Location::Directory(dir) => dir.join(format!("{symbol}.csv")),
        }
    }

    /// Parse CSV content into points sorted by timestamp.
    fn parse_points(content: &[u8]) -> Result<Vec<PricePoint>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content);

        let mut points = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let timestamp = Self::parse_timestamp(&record.date)?;

            points.push(PricePoint::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        // Stable, so duplicate timestamps keep file order
        points.sort_by_key(|p| p.timestamp);

        Ok(points)
    }

    /// Parse various timestamp formats into epoch milliseconds.
    fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
        const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
        const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
        for format in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
                return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
            }
        }

        // Unix timestamp
        if let Ok(ts) = date_str.parse::<i64>() {
            // Assume milliseconds if > 10 digits
            return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
        }

        Err(DataError::ParseError(format!(
            "Could not parse date: {date_str}"
        )))
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn fetch_series(
        &self,
        symbol: &str,
        window: DateWindow,
    ) -> Result<PriceSeries, DataError> {
        let path = self.path_for(symbol);
        let content = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound(path.display().to_string()),
            _ => DataError::Io(e),
        })?;

        let points = Self::parse_points(&content)?;
        let total = points.len();
        let points: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| window.contains(p.timestamp))
            .collect();

        debug!(
            symbol,
            path = %path.display(),
            total,
            in_window = points.len(),
            "Parsed CSV price data"
        );

        if points.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        info!(symbol, points = points.len(), "Loaded price series");
        Ok(PriceSeries::from_points(symbol, points))
    }

    fn name(&self) -> &str {
        "csv"
    }
}
