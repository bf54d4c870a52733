//! Core types and traits for the signal pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PricePoint, PriceSeries)
//! - Indicator output records and the indicator snapshot handed to policies
//! - Trading signals and policy decisions
//! - Core traits for indicators, signal policies, data sources and event sinks

pub mod types;
pub mod traits;
pub mod error;

pub use error::SignalError;
pub use types::*;
pub use traits::*;
