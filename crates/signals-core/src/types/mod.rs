//! Core data types for the signal pipeline.

mod indicator;
mod ohlcv;
mod signal;

pub use indicator::{BollingerBand, IndicatorSeries, IndicatorSnapshot, MacdPoint};
pub use ohlcv::{DateWindow, PricePoint, PriceSeries};
pub use signal::{Decision, Position, TradingSignal};
