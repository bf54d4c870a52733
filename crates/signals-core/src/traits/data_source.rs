//! Data source trait definitions.

use crate::error::DataError;
use crate::types::{DateWindow, PriceSeries};
use async_trait::async_trait;

/// Trait for historical market-data providers.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch a price series.
    ///
    /// # Arguments
    /// * `symbol` - The asset to fetch
    /// * `window` - Time bounds of the requested samples
    ///
    /// # Returns
    /// A series ordered from oldest to newest
    async fn fetch_series(
        &self,
        symbol: &str,
        window: DateWindow,
    ) -> Result<PriceSeries, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;

    struct FixedSource {
        points: Vec<PricePoint>,
    }

    #[async_trait]
    impl DataSource for FixedSource {
        async fn fetch_series(
            &self,
            symbol: &str,
            window: DateWindow,
        ) -> Result<PriceSeries, DataError> {
            let points: Vec<PricePoint> = self
                .points
                .iter()
                .filter(|p| window.contains(p.timestamp))
                .copied()
                .collect();
            if points.is_empty() {
                return Err(DataError::NoDataAvailable);
            }
            Ok(PriceSeries::from_points(symbol, points))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_fetch_through_trait_object() {
        let source: Box<dyn DataSource> = Box::new(FixedSource {
            points: vec![
                PricePoint::new(1_000, 1.0, 1.0, 1.0, 1.0, 0.0),
                PricePoint::new(2_000, 2.0, 2.0, 2.0, 2.0, 0.0),
            ],
        });

        let series = source.fetch_series("BNB", DateWindow::all()).await.unwrap();
        assert_eq!(series.symbol, "BNB");
        assert_eq!(series.closes(), vec![1.0, 2.0]);
        assert_eq!(source.name(), "fixed");
    }
}
