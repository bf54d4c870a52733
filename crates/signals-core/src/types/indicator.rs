//! Indicator output records.

use serde::{Deserialize, Serialize};

/// Indicator values aligned by index with the input series.
///
/// `None` marks positions where the indicator's lookback is not yet satisfied.
pub type IndicatorSeries<T> = Vec<Option<T>>;

/// Bollinger Bands at one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
}

impl BollingerBand {
    /// Distance from the middle band to either outer band.
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.upper - self.middle
    }

    /// Bandwidth ((upper - lower) / middle).
    pub fn bandwidth(&self) -> f64 {
        if self.middle != 0.0 {
            (self.upper - self.lower) / self.middle
        } else {
            0.0
        }
    }

    /// %B ((price - lower) / (upper - lower)); 0.5 when the bands have collapsed.
    pub fn percent_b(&self, price: f64) -> f64 {
        if self.upper != self.lower {
            (price - self.lower) / (self.upper - self.lower)
        } else {
            0.5
        }
    }

    /// Check if price is above upper band.
    pub fn is_overbought(&self, price: f64) -> bool {
        price > self.upper
    }

    /// Check if price is below lower band.
    pub fn is_oversold(&self, price: f64) -> bool {
        price < self.lower
    }
}

/// MACD at one index.
///
/// The signal line lags the MACD line, so it can be `None` while `macd` is defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: Option<f64>,
    /// Histogram (MACD - Signal)
    pub histogram: Option<f64>,
}

/// Latest close plus the latest value of each indicator.
///
/// This is everything a signal policy gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub bollinger: Option<BollingerBand>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdPoint>,
}

impl IndicatorSnapshot {
    /// Histogram of the latest MACD point, if both lines were defined.
    pub fn histogram(&self) -> Option<f64> {
        self.macd.and_then(|m| m.histogram)
    }
}
