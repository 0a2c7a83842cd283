use std::path::PathBuf;

use crate::error::Result;
use crate::model::ConfigFlags;
use crate::store::files;
use crate::store::lock;
use crate::store::paths::{StoragePaths, StoreFile};

/// The flag set in `config.ini`, loaded and saved whole.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    paths: StoragePaths,
}

impl ConfigStore {
    pub fn open(paths: &StoragePaths) -> Self {
        Self {
            paths: paths.clone(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.paths.config_path()
    }

    /// Corrupt file: reset on disk and return defaults. Missing file: defaults, nothing written.
    pub fn load(&self) -> Result<ConfigFlags> {
        let flags = files::read_or_reset(&self.path(), StoreFile::Config.default_contents())?;
        Ok(flags.unwrap_or_default())
    }

    pub fn save(&self, flags: &ConfigFlags) -> Result<()> {
        let lock_file = lock::acquire_lock(&self.paths.lock_path(StoreFile::Config))?;
        files::write_json(&self.path(), flags)?;
        lock::release_lock(lock_file)?;
        Ok(())
    }

    /// Set one flag by name and save the result.
    pub fn set(&self, key: &str, value: bool) -> Result<ConfigFlags> {
        let lock_file = lock::acquire_lock(&self.paths.lock_path(StoreFile::Config))?;
        let mut flags = self.load()?;
        flags.set(key, value)?;
        files::write_json(&self.path(), &flags)?;
        lock::release_lock(lock_file)?;
        tracing::debug!(key, value, "updated config flag");
        Ok(flags)
    }
}
