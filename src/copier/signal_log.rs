use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::core::types::TradeSignal;

/// Why the signal log could not be read or written.
///
/// Read-side variants are deliberately distinct (missing file vs. I/O error
/// vs. corrupt content) even though current policy collapses all three to
/// "empty history": the fail-open decision lives with the caller, not inside
/// an opaque catch-all.
#[derive(Debug, thiserror::Error)]
pub enum SignalLogError {
    #[error("signal log does not exist at {}", .0.display())]
    Missing(PathBuf),
    #[error("signal log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("signal log content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Durable append-only signal log, newest first.
///
/// The file is a single JSON array of `TradeSignal` and is the sole durable
/// state of the system. It is only ever mutated by prepending a batch per
/// scan cycle; there is no pruning, rotation or compaction, so it grows
/// without bound by design. Exactly one sequential writer is assumed —
/// concurrent external writers would corrupt dedup correctness, and a
/// concurrent reader may observe a partial write.
#[derive(Debug)]
pub struct SignalLog {
    path: PathBuf,
}

impl SignalLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full log, newest first. Callers decide what a failure
    /// means; see [`load_or_empty`](Self::load_or_empty) for the fail-open
    /// reading.
    pub fn load(&self) -> Result<Vec<TradeSignal>, SignalLogError> {
        if !self.path.exists() {
            return Err(SignalLogError::Missing(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The fail-open read: any failure — missing file, I/O error, corrupt
    /// content — is treated as an empty history. Over-reporting a signal is
    /// preferred to silently losing one.
    pub fn load_or_empty(&self) -> Vec<TradeSignal> {
        match self.load() {
            Ok(signals) => signals,
            Err(SignalLogError::Missing(_)) => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Signal log unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// True iff some persisted signal carries `tx_hash`. Fail-open: an
    /// unreadable log means "not seen".
    pub fn contains(&self, tx_hash: &str) -> bool {
        self.load_or_empty()
            .iter()
            .any(|signal| signal.tx_hash == tx_hash)
    }

    /// Persists a batch of new signals ahead of everything already logged
    /// and returns the new log length. The read half is fail-open; a write
    /// failure surfaces so the monitor can log it and move on.
    pub fn prepend(&self, batch: &[TradeSignal]) -> Result<usize, SignalLogError> {
        let mut combined = batch.to_vec();
        combined.extend(self.load_or_empty());

        let serialized = serde_json::to_string_pretty(&combined)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(serialized.as_bytes())?;

        Ok(combined.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SignalType;
    use tempfile::tempdir;

    fn signal(tx_hash: &str) -> TradeSignal {
        TradeSignal {
            timestamp: Some("2024-05-01T12:00:00Z".to_string()),
            wallet: "0xwallet".to_string(),
            token: Some("PEPE".to_string()),
            amount: Some(100.0),
            tx_hash: tx_hash.to_string(),
            signal_type: SignalType::Buy,
        }
    }

    #[test]
    fn missing_file_is_a_distinct_error_but_loads_empty() {
        let dir = tempdir().unwrap();
        let log = SignalLog::new(dir.path().join("signals.json"));

        assert!(matches!(log.load(), Err(SignalLogError::Missing(_))));
        assert!(log.load_or_empty().is_empty());
        assert!(!log.contains("0xAA"));
    }

    #[test]
    fn corrupt_content_is_fail_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signals.json");
        fs::write(&path, "{ not json [").unwrap();

        let log = SignalLog::new(&path);
        assert!(matches!(log.load(), Err(SignalLogError::Parse(_))));
        assert!(log.load_or_empty().is_empty());
        assert!(!log.contains("0xCC"));

        // A write after the corrupt read replaces the file cleanly
        let len = log.prepend(&[signal("0xCC")]).unwrap();
        assert_eq!(len, 1);
        assert_eq!(log.load().unwrap()[0].tx_hash, "0xCC");
    }

    #[test]
    fn prepend_creates_the_file_on_first_run() {
        let dir = tempdir().unwrap();
        let log = SignalLog::new(dir.path().join("signals.json"));

        let len = log.prepend(&[signal("0xAA")]).unwrap();
        assert_eq!(len, 1);

        let persisted = log.load().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].tx_hash, "0xAA");
    }

    #[test]
    fn prepend_puts_new_signals_before_old_in_batch_order() {
        let dir = tempdir().unwrap();
        let log = SignalLog::new(dir.path().join("signals.json"));

        log.prepend(&[signal("0xAA")]).unwrap();
        let len = log.prepend(&[signal("0xBB"), signal("0xCC")]).unwrap();
        assert_eq!(len, 3);

        let hashes: Vec<String> = log
            .load()
            .unwrap()
            .into_iter()
            .map(|s| s.tx_hash)
            .collect();
        assert_eq!(hashes, vec!["0xBB", "0xCC", "0xAA"]);
    }

    #[test]
    fn contains_finds_persisted_hashes_only() {
        let dir = tempdir().unwrap();
        let log = SignalLog::new(dir.path().join("signals.json"));
        log.prepend(&[signal("0xAA")]).unwrap();

        assert!(log.contains("0xAA"));
        assert!(!log.contains("0xBB"));
    }

    #[test]
    fn write_failure_surfaces_as_io_error() {
        // Parent directory does not exist, so the create must fail
        let log = SignalLog::new("/nonexistent-dir/signals.json");
        assert!(matches!(
            log.prepend(&[signal("0xAA")]),
            Err(SignalLogError::Io(_))
        ));
    }
}
