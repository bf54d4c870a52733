//! Indicator trait definitions.

use crate::types::IndicatorSeries;

/// Trait for technical indicators.
///
/// Indicators process price data and produce derived values aligned by
/// index with the input.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output: Copy;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically close prices)
    ///
    /// # Returns
    /// One entry per input value; `None` until the lookback is satisfied.
    fn calculate(&self, data: &[f64]) -> IndicatorSeries<Self::Output>;

    /// Get the number of data points required for the first defined value.
    fn lookback(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
