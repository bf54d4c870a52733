//! Price data sources and signal journals.

mod csv_source;
mod journal;

pub use csv_source::CsvDataSource;
pub use journal::CsvJournal;

use signals_core::error::DataError;
use signals_core::traits::DataSource;
use signals_core::types::{DateWindow, PriceSeries};

/// Load a full price series from a CSV file.
pub async fn load_csv(path: &str, symbol: &str) -> Result<PriceSeries, DataError> {
    let source = CsvDataSource::new(path)?;
    source.fetch_series(symbol, DateWindow::all()).await
}
