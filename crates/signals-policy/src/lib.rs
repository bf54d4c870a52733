//! Signal policies and the trading-signal pipeline.
//!
//! This crate turns an indicator snapshot into a validated trading signal:
//! - Confluence (RSI, MACD and Bollinger votes; the default)
//! - Trend (MACD-led with RSI confirmation)
//!
//! Policies are pluggable through [`signals_core::traits::SignalPolicy`];
//! [`SignalPipeline`] rejects any decision that breaks the price ordering.

mod confluence;
mod pipeline;
mod registry;
mod stops;
mod trend;

pub use confluence::{ConfluenceConfig, ConfluencePolicy};
pub use pipeline::{validate_decision, SignalPipeline};
pub use registry::{PolicyInfo, PolicyRegistry};
pub use trend::{TrendConfig, TrendPolicy};
