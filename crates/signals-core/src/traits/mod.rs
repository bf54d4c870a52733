//! Core traits for the signal pipeline.

mod data_source;
mod event_sink;
mod indicator;
mod policy;

pub use data_source::DataSource;
pub use event_sink::{EventSink, JournalEntry};
pub use indicator::Indicator;
pub use policy::{PolicyConfig, SignalPolicy};
