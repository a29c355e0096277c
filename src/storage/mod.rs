pub mod json_backend;

use std::time::{Duration, Instant};

use tracing::warn;

use crate::domain::app_data::AppData;
use crate::errors::Result;

pub use json_backend::{AppStore, BackupInfo, DATA_FILE_NAME};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);

/// Coalesces rapid successive edits into one write. Mutating commands call
/// `mark_dirty`; the shell loop calls `flush_if_due` between commands and
/// `flush` on exit. A failed write is reported and the dirty flag kept, so
/// in-memory state may diverge from disk until the next successful write.
/// There are no automatic retries.
#[derive(Debug)]
pub struct Autosave {
    debounce: Duration,
    dirty_since: Option<Instant>,
}

impl Autosave {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            dirty_since: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        if self.dirty_since.is_none() {
            self.dirty_since = Some(Instant::now());
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Writes when the debounce window has elapsed. Returns whether a
    /// write happened.
    pub fn flush_if_due(&mut self, store: &AppStore, data: &AppData) -> Result<bool> {
        match self.dirty_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.flush(store, data)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Forces a write of any pending changes.
    pub fn flush(&mut self, store: &AppStore, data: &AppData) -> Result<()> {
        if self.dirty_since.is_none() {
            return Ok(());
        }
        match store.save(data) {
            Ok(()) => {
                self.dirty_since = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "autosave failed; keeping state dirty");
                Err(err)
            }
        }
    }
}

impl Default for Autosave {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flush_if_due_waits_for_the_debounce_window() {
        let temp = TempDir::new().unwrap();
        let store = AppStore::new(Some(temp.path().to_path_buf()), None).unwrap();
        let data = AppData::default();

        let mut autosave = Autosave::new(Duration::from_secs(3600));
        autosave.mark_dirty();
        assert!(!autosave.flush_if_due(&store, &data).unwrap());
        assert!(autosave.is_dirty());

        autosave.flush(&store, &data).unwrap();
        assert!(!autosave.is_dirty());
        assert!(store.data_path().exists());
    }

    #[test]
    fn clean_flush_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let store = AppStore::new(Some(temp.path().to_path_buf()), None).unwrap();
        let mut autosave = Autosave::default();
        autosave.flush(&store, &AppData::default()).unwrap();
        assert!(!store.data_path().exists());
    }
}
