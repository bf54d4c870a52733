//! Index-aligned technical indicators.
//!
//! This crate provides the indicator engine:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Bollinger Bands)
//!
//! Every indicator returns one entry per input price. Positions before an
//! indicator's lookback is satisfied hold `None` rather than a partial value.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use engine::{IndicatorConfig, IndicatorEngine, IndicatorSet};
pub use momentum::{macd, rsi, Macd, Rsi, SignalLineMode};
pub use moving_average::{ema, sma, Ema, Sma};
pub use volatility::{bollinger_bands, population_std_dev, BollingerBands};
