//! Momentum indicators.

use serde::{Deserialize, Serialize};
use signals_core::error::IndicatorError;
use signals_core::traits::Indicator;
use signals_core::types::{IndicatorSeries, MacdPoint};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// Average gain and loss are plain means over the most recent `period`
/// changes, recomputed at every index (no Wilder smoothing). A window with
/// no losses reads 100, including a window with no movement at all.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be greater than 0".into(),
            ));
        }
        Ok(Self { period })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries<f64> {
        let mut result = vec![None; data.len()];
        if data.len() <= self.period {
            return result;
        }

        // Change i is the move from close i to close i + 1
        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|pair| {
                let change = pair[1] - pair[0];
                if change > 0.0 {
                    (change, 0.0)
                } else {
                    (0.0, -change)
                }
            })
            .unzip();

        let period_f64 = self.period as f64;
        for (i, slot) in result.iter_mut().enumerate().skip(self.period) {
            let window = i - self.period..i;
            let avg_gain = gains[window.clone()].iter().sum::<f64>() / period_f64;
            let avg_loss = losses[window].iter().sum::<f64>() / period_f64;
            *slot = Some(Self::from_averages(avg_gain, avg_loss));
        }

        result
    }

    fn lookback(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// How the MACD signal line is aligned with the MACD line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalLineMode {
    /// Signal EMA starts at the first defined MACD value and is reported
    /// once `signal_period` MACD values have been consumed. Every signal
    /// value sits at the index of the MACD value it last absorbed.
    #[default]
    Aligned,
    /// Undefined MACD values are dropped before smoothing and the signal
    /// EMA is read back by input index. Because the MACD line is defined
    /// from index 0, the signal is too.
    Compacted,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    mode: SignalLineMode,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self {
            fast: Ema::with_nonzero_period(12),
            slow: Ema::with_nonzero_period(26),
            signal: Ema::with_nonzero_period(9),
            mode: SignalLineMode::default(),
        }
    }

    /// Create a MACD with custom periods.
    ///
    /// Every period must be positive and `fast` must be strictly shorter than
    /// `slow`. Anything else is `InvalidParameter`.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Result<Self, IndicatorError> {
        if fast >= slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD fast period ({fast}) must be less than slow period ({slow})"
            )));
        }
        Ok(Self {
            fast: Ema::new(fast)?,
            slow: Ema::new(slow)?,
            signal: Ema::new(signal)?,
            mode: SignalLineMode::default(),
        })
    }

    /// Select how the signal line is aligned.
    pub fn with_mode(mut self, mode: SignalLineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SignalLineMode {
        self.mode
    }

    /// MACD line, fast EMA minus slow EMA at every index.
    pub fn macd_line(&self, data: &[f64]) -> IndicatorSeries<f64> {
        self.fast
            .smooth(data)
            .into_iter()
            .zip(self.slow.smooth(data))
            .map(|(fast, slow)| Some(fast - slow))
            .collect()
    }

    fn aligned_signal(&self, macd_line: &[Option<f64>]) -> IndicatorSeries<f64> {
        let mut result = vec![None; macd_line.len()];
        let multiplier = self.signal.multiplier();
        let mut ema: Option<f64> = None;
        let mut consumed = 0;

        for (i, value) in macd_line.iter().enumerate() {
            let Some(value) = *value else {
                continue;
            };
            let next = match ema {
                Some(prev) => value * multiplier + prev * (1.0 - multiplier),
                None => value,
            };
            ema = Some(next);
            consumed += 1;
            if consumed >= self.signal.period() {
                result[i] = Some(next);
            }
        }

        result
    }

    fn compacted_signal(&self, macd_line: &[Option<f64>]) -> IndicatorSeries<f64> {
        let compacted: Vec<f64> = macd_line.iter().flatten().copied().collect();
        let smoothed = self.signal.smooth(&compacted);
        (0..macd_line.len()).map(|i| smoothed.get(i).copied()).collect()
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdPoint;

    fn calculate(&self, data: &[f64]) -> IndicatorSeries<MacdPoint> {
        let macd_line = self.macd_line(data);
        let signal_line = match self.mode {
            SignalLineMode::Aligned => self.aligned_signal(&macd_line),
            SignalLineMode::Compacted => self.compacted_signal(&macd_line),
        };

        macd_line
            .into_iter()
            .zip(signal_line)
            .map(|(macd, signal)| {
                macd.map(|macd| MacdPoint {
                    macd,
                    signal,
                    histogram: signal.map(|s| macd - s),
                })
            })
            .collect()
    }

    fn lookback(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// One-shot RSI over `prices`.
pub fn rsi(prices: &[f64], period: usize) -> Result<IndicatorSeries<f64>, IndicatorError> {
    Ok(Rsi::new(period)?.calculate(prices))
}

/// One-shot MACD over `prices` with the default signal-line alignment.
pub fn macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<IndicatorSeries<MacdPoint>, IndicatorError> {
    Ok(Macd::with_periods(fast, slow, signal)?.calculate(prices))
}
