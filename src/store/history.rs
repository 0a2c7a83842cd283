use std::path::PathBuf;

use crate::error::Result;
use crate::model::History;
use crate::store::files;
use crate::store::lock;
use crate::store::paths::{StoragePaths, StoreFile};

/// Append-only ledger of task names cleaned out of each folder (`history.json`).
#[derive(Debug, Clone)]
pub struct HistoryStore {
    paths: StoragePaths,
}

impl HistoryStore {
    pub fn open(paths: &StoragePaths) -> Self {
        Self {
            paths: paths.clone(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.paths.history_path()
    }

    /// A corrupt ledger is reset to `{}`; a missing one reads as empty.
    pub fn load(&self) -> Result<History> {
        let history = files::read_or_reset(&self.path(), StoreFile::History.default_contents())?;
        Ok(history.unwrap_or_default())
    }

    pub fn save(&self, history: &History) -> Result<()> {
        files::write_json(&self.path(), history)
    }

    pub fn names(&self, folder: &str) -> Result<Vec<String>> {
        Ok(self.load()?.remove(folder).unwrap_or_default())
    }

    pub fn record_completion(&self, folder: &str, name: &str) -> Result<()> {
        let lock_file = lock::acquire_lock(&self.paths.lock_path(StoreFile::History))?;
        let mut history = self.load()?;
        history
            .entry(folder.to_string())
            .or_default()
            .push(name.to_string());
        self.save(&history)?;
        lock::release_lock(lock_file)?;
        tracing::debug!(folder, name, "recorded completion");
        Ok(())
    }

    /// One round trip per pair; a failure part-way leaves the earlier entries recorded.
    pub fn record_completions(&self, tasks: &[(String, String)]) -> Result<()> {
        for (folder, name) in tasks {
            self.record_completion(folder, name)?;
        }
        Ok(())
    }
}
