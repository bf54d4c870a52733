//! Moving average indicators.

use signals_core::error::IndicatorError;
use signals_core::traits::Indicator;
use signals_core::types::IndicatorSeries;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "SMA period must be greater than 0".into(),
            ));
        }
        Ok(Self::with_nonzero_period(period))
    }

    pub(crate) fn with_nonzero_period(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries<f64> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Each window is summed from scratch; a running sum loses small
        // values once a large one leaves the window.
        for (i, window) in data.windows(self.period).enumerate() {
            result[i + self.period - 1] = Some(window.iter().sum::<f64>() / period_f64);
        }

        result
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay. The first
/// output is seeded with the first price rather than an N-period average, so
/// the EMA is defined from index 0.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "EMA period must be greater than 0".into(),
            ));
        }
        Ok(Self::with_nonzero_period(period))
    }

    /// Caller guarantees `period > 0`.
    pub(crate) fn with_nonzero_period(period: usize) -> Self {
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing factor, 2 / (period + 1).
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Raw smoothed values, one per input.
    pub fn smooth(&self, data: &[f64]) -> Vec<f64> {
        let Some((&first, rest)) = data.split_first() else {
            return vec![];
        };

        let mut result = Vec::with_capacity(data.len());
        let one_minus_mult = 1.0 - self.multiplier;

        let mut ema = first;
        result.push(ema);

        for &price in rest {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries<f64> {
        self.smooth(data).into_iter().map(Some).collect()
    }

    fn lookback(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// One-shot SMA over `prices`.
pub fn sma(prices: &[f64], period: usize) -> Result<IndicatorSeries<f64>, IndicatorError> {
    Ok(Sma::new(period)?.calculate(prices))
}

/// One-shot EMA over `prices`.
pub fn ema(prices: &[f64], period: usize) -> Result<IndicatorSeries<f64>, IndicatorError> {
    Ok(Ema::new(period)?.calculate(prices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3).unwrap();
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_none());
        assert!(result[1].is_none());
        assert!((result[2].unwrap() - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4].unwrap() - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let result = sma(&[1.0, 2.0, 3.0], 5).unwrap();

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_sma_thirty_ascending() {
        let data: Vec<f64> = (1..=30).map(f64::from).collect();
        let result = sma(&data, 5).unwrap();

        // Mean of 26..=30
        assert_eq!(result[29], Some(28.0));
    }

    #[test]
    fn test_sma_strictly_increasing_after_warmup() {
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64 * 0.5).collect();
        let result = sma(&data, 7).unwrap();

        let defined: Vec<f64> = result.iter().flatten().copied().collect();
        assert_eq!(defined.len(), 44);
        for pair in defined.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_sma_recovers_after_large_value_leaves_window() {
        let mut data = vec![1e16];
        data.extend(std::iter::repeat(1.0).take(10));
        let result = sma(&data, 2).unwrap();

        assert_eq!(result[1], Some((1e16 + 1.0) / 2.0));
        for value in &result[2..] {
            assert_eq!(*value, Some(1.0));
        }
    }

    #[test]
    fn test_sma_outlier_does_not_drift() {
        let mut data = vec![1.5; 100_000];
        data[10] = 1e9;
        let result = sma(&data, 20).unwrap();

        assert_eq!(result[99_999], Some(1.5));
    }

    #[test]
    fn test_sma_period_one_is_identity() {
        let data = vec![3.0, 1.0, 4.0];
        let result = sma(&data, 1).unwrap();
        assert_eq!(result, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(
            Sma::new(0),
            Err(IndicatorError::InvalidParameter(_))
        ));
        assert!(ema(&[1.0], 0).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(sma(&[], 3).unwrap().is_empty());
        assert!(ema(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_ema() {
        let ema = Ema::new(3).unwrap();
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ema.calculate(&data);

        assert_eq!(result.len(), 5);
        // Seeded with the first price
        assert_eq!(result[0], Some(1.0));
        // mult = 2/(3+1) = 0.5
        // result[1] = 2 * 0.5 + 1 * 0.5 = 1.5
        assert!((result[1].unwrap() - 1.5).abs() < 1e-10);
        // result[2] = 3 * 0.5 + 1.5 * 0.5 = 2.25
        assert!((result[2].unwrap() - 2.25).abs() < 1e-10);
    }

    #[test]
    fn test_ema_seed_for_any_period() {
        let data = vec![42.5, 40.0, 41.0];
        for period in [1, 2, 9, 26, 200] {
            let result = ema(&data, period).unwrap();
            assert_eq!(result[0], Some(42.5));
            assert!(result.iter().all(Option::is_some));
        }
    }

    #[test]
    fn test_ema_smoothing_factor() {
        let ema = Ema::new(10).unwrap();
        assert!((ema.multiplier() - 2.0 / 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ema_constant_series() {
        let data = vec![100.0; 30];
        let result = ema(&data, 12).unwrap();
        for value in result.iter().flatten() {
            assert!((value - 100.0).abs() < 1e-9);
        }
    }
}
