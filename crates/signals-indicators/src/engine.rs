//! Indicator engine: one configured pass over a close-price series.

use serde::{Deserialize, Serialize};
use signals_core::error::IndicatorError;
use signals_core::traits::Indicator;
use signals_core::types::{
    BollingerBand, IndicatorSeries, IndicatorSnapshot, MacdPoint, PriceSeries,
};

use crate::momentum::{Macd, Rsi, SignalLineMode};
use crate::moving_average::{Ema, Sma};
use crate::volatility::BollingerBands;

/// Indicator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_period: usize,
    pub bollinger_period: usize,
    pub std_dev_multiplier: f64,
    pub rsi_period: usize,
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
    pub signal_line: SignalLineMode,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: 20,
            bollinger_period: 20,
            std_dev_multiplier: 2.0,
            rsi_period: 14,
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            signal_line: SignalLineMode::Aligned,
        }
    }
}

impl IndicatorConfig {
    /// Validate every parameter by building the engine.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        IndicatorEngine::new(self.clone()).map(|_| ())
    }
}

/// All indicator series for one input, index-aligned with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    pub sma: IndicatorSeries<f64>,
    /// EMA over the MACD fast period.
    pub ema: IndicatorSeries<f64>,
    pub bollinger: IndicatorSeries<BollingerBand>,
    pub rsi: IndicatorSeries<f64>,
    pub macd: IndicatorSeries<MacdPoint>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.sma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma.is_empty()
    }

    /// Snapshot at index `i`, paired with the close at that index.
    pub fn snapshot_at(&self, i: usize, close: f64) -> Option<IndicatorSnapshot> {
        if i >= self.len() {
            return None;
        }
        Some(IndicatorSnapshot {
            close,
            bollinger: self.bollinger[i],
            rsi: self.rsi[i],
            macd: self.macd[i],
        })
    }
}

/// Runs every configured indicator over a series.
///
/// Indicators are evaluated sequentially in a fixed order; each is pure, so
/// the result does not depend on that order.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
    sma: Sma,
    ema: Ema,
    bollinger: BollingerBands,
    rsi: Rsi,
    macd: Macd,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Result<Self, IndicatorError> {
        let sma = Sma::new(config.sma_period)?;
        let ema = Ema::new(config.fast_period)?;
        let bollinger =
            BollingerBands::with_params(config.bollinger_period, config.std_dev_multiplier)?;
        let rsi = Rsi::new(config.rsi_period)?;
        let macd = Macd::with_periods(
            config.fast_period,
            config.slow_period,
            config.signal_period,
        )?
        .with_mode(config.signal_line);

        Ok(Self {
            config,
            sma,
            ema,
            bollinger,
            rsi,
            macd,
        })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Minimum number of closes before every snapshot field can be defined.
    pub fn warmup(&self) -> usize {
        let signal_warmup = match self.config.signal_line {
            SignalLineMode::Aligned => self.config.signal_period,
            SignalLineMode::Compacted => 1,
        };
        self.bollinger
            .lookback()
            .max(self.rsi.lookback())
            .max(signal_warmup)
    }

    pub fn compute(&self, closes: &[f64]) -> IndicatorSet {
        IndicatorSet {
            sma: self.sma.calculate(closes),
            ema: self.ema.calculate(closes),
            bollinger: self.bollinger.calculate(closes),
            rsi: self.rsi.calculate(closes),
            macd: self.macd.calculate(closes),
        }
    }

    /// Snapshot of the final price point, `None` for an empty series.
    pub fn snapshot(&self, series: &PriceSeries) -> Option<IndicatorSnapshot> {
        let last = series.last()?;
        let set = self.compute(&series.closes());
        set.snapshot_at(set.len() - 1, last.close)
    }
}
