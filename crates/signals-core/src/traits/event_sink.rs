//! Append-only event sink for derived signals.

use crate::error::DataError;
use crate::types::{Position, TradingSignal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub asset: String,
    pub position: Position,
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,
    pub confidence: u8,
    pub policy: String,
}

impl JournalEntry {
    /// Build an entry for a signal.
    pub fn from_signal(
        id: impl Into<String>,
        recorded_at: DateTime<Utc>,
        signal: &TradingSignal,
    ) -> Self {
        Self {
            id: id.into(),
            recorded_at,
            asset: signal.asset.clone(),
            position: signal.position,
            entry: signal.entry,
            target: signal.target,
            stop_loss: signal.stop_loss,
            confidence: signal.confidence,
            policy: signal.policy.clone(),
        }
    }
}

/// Destination for signal history. Entries are only ever appended.
pub trait EventSink: Send {
    /// Append one entry.
    fn append(&mut self, entry: &JournalEntry) -> Result<(), DataError>;

    /// Flush buffered entries to the underlying store.
    fn flush(&mut self) -> Result<(), DataError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct VecSink {
        entries: Vec<JournalEntry>,
    }

    impl EventSink for VecSink {
        fn append(&mut self, entry: &JournalEntry) -> Result<(), DataError> {
            self.entries.push(entry.clone());
            Ok(())
        }
    }

    #[test]
    fn test_entry_from_signal() {
        let signal = TradingSignal {
            asset: "CAKE".to_string(),
            position: Position::Long,
            entry: 2.0,
            target: 2.4,
            stop_loss: 1.8,
            confidence: 7,
            policy: "confluence".to_string(),
            rationale: "oversold".to_string(),
        };
        let recorded_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let mut sink = VecSink::default();
        sink.append(&JournalEntry::from_signal("e-1", recorded_at, &signal))
            .unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.entries.len(), 1);
        let entry = &sink.entries[0];
        assert_eq!(entry.asset, "CAKE");
        assert_eq!(entry.position, Position::Long);
        assert_eq!(entry.confidence, 7);
        assert_eq!(entry.recorded_at, recorded_at);
    }
}
