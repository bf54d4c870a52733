//! Volatility indicators.

use signals_core::error::IndicatorError;
use signals_core::traits::Indicator;
use signals_core::types::{BollingerBand, IndicatorSeries};

use crate::moving_average::Sma;

/// Population standard deviation of `window`.
///
/// Values are shifted by the first element before squaring, so a window of
/// equal values yields exactly zero.
pub fn population_std_dev(window: &[f64]) -> f64 {
    let Some(&shift) = window.first() else {
        return 0.0;
    };
    let n = window.len() as f64;
    let (sum, sum_sq) = window.iter().fold((0.0, 0.0), |(sum, sum_sq), &x| {
        let d = x - shift;
        (sum + d, sum_sq + d * d)
    });
    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0).sqrt()
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    middle: Sma,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self {
            middle: Sma::with_nonzero_period(20),
            std_dev_multiplier: 2.0,
        }
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Result<Self, IndicatorError> {
        if !std_dev_multiplier.is_finite() || std_dev_multiplier <= 0.0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "Bollinger std dev multiplier must be positive, got {std_dev_multiplier}"
            )));
        }
        Ok(Self {
            middle: Sma::new(period)?,
            std_dev_multiplier,
        })
    }

    pub fn period(&self) -> usize {
        self.middle.period()
    }

    pub fn std_dev_multiplier(&self) -> f64 {
        self.std_dev_multiplier
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerBand;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries<BollingerBand> {
        let period = self.period();
        self.middle
            .calculate(data)
            .into_iter()
            .enumerate()
            .map(|(i, middle)| {
                let middle = middle?;
                let window = &data[i + 1 - period..=i];
                let spread = self.std_dev_multiplier * population_std_dev(window);
                Some(BollingerBand {
                    upper: middle + spread,
                    middle,
                    lower: middle - spread,
                })
            })
            .collect()
    }

    fn lookback(&self) -> usize {
        self.period()
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

/// One-shot Bollinger Bands over `prices`.
pub fn bollinger_bands(
    prices: &[f64],
    period: usize,
    std_dev_multiplier: f64,
) -> Result<IndicatorSeries<BollingerBand>, IndicatorError> {
    Ok(BollingerBands::with_params(period, std_dev_multiplier)?.calculate(prices))
}
