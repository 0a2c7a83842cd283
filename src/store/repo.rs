use crate::error::Result;
use crate::model::{ConfigFlags, History, Snapshot, Task};
use crate::store::config::ConfigStore;
use crate::store::history::HistoryStore;
use crate::store::paths::StoragePaths;
use crate::store::tasks::TaskStore;

/// The three stores of one data directory.
pub struct Repo {
    pub paths: StoragePaths,
    pub tasks: TaskStore,
    pub history: HistoryStore,
    pub config: ConfigStore,
}

/// Everything a front end needs on startup.
#[derive(Debug, Clone)]
pub struct Startup {
    pub tasks: Snapshot,
    pub history: History,
    pub config: ConfigFlags,
}

impl Repo {
    /// Open a data directory, creating it and any missing file first.
    pub fn open(paths: StoragePaths) -> Result<Self> {
        paths.ensure_initialized()?;
        tracing::debug!(dir = %paths.dir().display(), "opened task store");
        Ok(Self {
            tasks: TaskStore::open(&paths),
            history: HistoryStore::open(&paths),
            config: ConfigStore::open(&paths),
            paths,
        })
    }

    /// Open `~/.todo`.
    pub fn open_default() -> Result<Self> {
        Self::open(StoragePaths::resolve()?)
    }

    pub fn startup(&self) -> Result<Startup> {
        Ok(Startup {
            tasks: self.tasks.load_all()?,
            history: self.history.load()?,
            config: self.config.load()?,
        })
    }

    /// Fetch one task from a fresh read of the task file.
    pub fn task(&self, folder: &str, name: &str) -> Result<Task> {
        self.tasks.get(folder, name)
    }

    /// Clean completed tasks in one folder, or everywhere.
    pub fn clean_completed(&self, folder: Option<&str>) -> Result<Vec<(String, String)>> {
        self.tasks.clean_completed(folder, &self.history)
    }
}
