//! CSV signal journal.

use chrono::Utc;
use csv::WriterBuilder;
use signals_core::error::DataError;
use signals_core::traits::{EventSink, JournalEntry};
use signals_core::types::TradingSignal;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Append-only CSV log of derived signals.
///
/// The header row is written only when the file is created or empty, so
/// reopening an existing journal keeps a single header.
pub struct CsvJournal {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvJournal {
    /// Open `path` for appending, creating it and its parent directory if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let is_new = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let writer = WriterBuilder::new().has_headers(is_new).from_writer(file);

        info!(path = %path.display(), is_new, "Opened signal journal");
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a signal under a fresh id and the current time.
    pub fn record(&mut self, signal: &TradingSignal) -> Result<JournalEntry, DataError> {
        let entry = JournalEntry::from_signal(uuid::Uuid::new_v4().to_string(), Utc::now(), signal);
        self.append(&entry)?;
        Ok(entry)
    }
}

impl EventSink for CsvJournal {
    fn append(&mut self, entry: &JournalEntry) -> Result<(), DataError> {
        self.writer
            .serialize(entry)
            .map_err(|e| DataError::Journal(e.to_string()))?;
        debug!(id = %entry.id, asset = %entry.asset, "Journaled signal");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DataError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for CsvJournal {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signals_core::types::Position;

    fn signal(asset: &str) -> TradingSignal {
        TradingSignal {
            asset: asset.to_string(),
            position: Position::Short,
            entry: 100.0,
            target: 90.0,
            stop_loss: 105.0,
            confidence: 6,
            policy: "confluence".to_string(),
            rationale: "overbought".to_string(),
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal").join("signals.csv");

        {
            let mut journal = CsvJournal::open(&path).unwrap();
            journal.record(&signal("AAA")).unwrap();
            journal.flush().unwrap();
        }
        {
            let mut journal = CsvJournal::open(&path).unwrap();
            journal.record(&signal("BBB")).unwrap();
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,recorded_at,asset,position,entry,target,stop_loss,confidence,policy"
        );
        assert!(lines[1].contains(",AAA,short,100.0,90.0,105.0,6,confluence"));
        assert!(lines[2].contains(",BBB,"));
    }

    #[test]
    fn test_entries_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.csv");

        let recorded = {
            let mut journal = CsvJournal::open(&path).unwrap();
            let first = journal.record(&signal("AAA")).unwrap();
            let second = journal.record(&signal("BBB")).unwrap();
            journal.flush().unwrap();
            vec![first, second]
        };
        assert_ne!(recorded[0].id, recorded[1].id);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let entries: Vec<JournalEntry> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(entries, recorded);
    }
}
