//! On-disk layout of the task store.
//!
//! Everything lives in one per-user directory, `~/.todo/` by default:
//!
//! - `tasks.json`   folder -> task name -> record
//! - `history.json` folder -> cleaned task names
//! - `config.ini`   application flags (JSON, despite the extension)
//!
//! Each data file has a sibling `.lock` file used to serialize writers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TodoError};
use crate::store::files;

/// Directory created under the user's home.
pub const APP_DIR_NAME: &str = ".todo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreFile {
    Tasks,
    History,
    Config,
}

impl StoreFile {
    pub const ALL: [StoreFile; 3] = [StoreFile::Tasks, StoreFile::History, StoreFile::Config];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks.json",
            Self::History => "history.json",
            Self::Config => "config.ini",
        }
    }

    fn lock_name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks.lock",
            Self::History => "history.lock",
            Self::Config => "config.lock",
        }
    }

    /// Content written on first start and whenever the file is found corrupt.
    pub fn default_contents(self) -> &'static str {
        match self {
            Self::Tasks => r#"{"general": {}}"#,
            Self::History => "{}",
            Self::Config => r#"{"first_time": true, "auto_clean": false, "notifications": true}"#,
        }
    }
}

/// Resolved locations of the store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    dir: PathBuf,
}

impl StoragePaths {
    /// `~/.todo`. Touches nothing on disk.
    pub fn resolve() -> Result<Self> {
        let home = dirs::home_dir().ok_or(TodoError::HomeDirUnavailable)?;
        Ok(Self::at(home.join(APP_DIR_NAME)))
    }

    /// Same layout rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: StoreFile) -> PathBuf {
        self.dir.join(file.file_name())
    }

    pub fn lock_path(&self, file: StoreFile) -> PathBuf {
        self.dir.join(file.lock_name())
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.path(StoreFile::Tasks)
    }

    pub fn history_path(&self) -> PathBuf {
        self.path(StoreFile::History)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path(StoreFile::Config)
    }

    /// Create the directory and any missing file with its default content.
    /// Existing files are left untouched, so this is safe on every start.
    pub fn ensure_initialized(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        for file in StoreFile::ALL {
            let path = self.path(file);
            if !path.exists() {
                files::write_atomic(&path, file.default_contents().as_bytes())?;
                tracing::debug!(path = %path.display(), "created store file");
            }
        }
        Ok(())
    }

    /// Overwrite one file with its default content.
    pub fn force_reset(&self, file: StoreFile) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(file);
        files::write_atomic(&path, file.default_contents().as_bytes())?;
        tracing::info!(path = %path.display(), "reset store file to default");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_points_under_home() {
        if let Some(home) = dirs::home_dir() {
            let paths = StoragePaths::resolve().unwrap();
            assert_eq!(paths.dir(), home.join(".todo"));
            assert_eq!(paths.tasks_path(), home.join(".todo").join("tasks.json"));
        }
    }

    #[test]
    fn layout_uses_fixed_file_names() {
        let paths = StoragePaths::at("/data/todo");
        assert!(paths.tasks_path().ends_with("tasks.json"));
        assert!(paths.history_path().ends_with("history.json"));
        assert!(paths.config_path().ends_with("config.ini"));
        assert!(paths.lock_path(StoreFile::Tasks).ends_with("tasks.lock"));
    }

    #[test]
    fn defaults_are_valid_json() {
        for file in StoreFile::ALL {
            let parsed: serde_json::Value =
                serde_json::from_str(file.default_contents()).unwrap();
            assert!(parsed.is_object(), "{file:?} default should be an object");
        }
    }

    #[test]
    fn ensure_initialized_creates_directory_and_defaults() {
        let dir = tempdir().unwrap();
        let paths = StoragePaths::at(dir.path().join("nested").join(".todo"));

        paths.ensure_initialized().unwrap();

        for file in StoreFile::ALL {
            let contents = fs::read_to_string(paths.path(file)).unwrap();
            assert_eq!(contents, file.default_contents());
        }
    }

    #[test]
    fn ensure_initialized_is_idempotent() {
        let dir = tempdir().unwrap();
        let paths = StoragePaths::at(dir.path());
        paths.ensure_initialized().unwrap();

        let populated = r#"{"general": {"a": {"achieved": true, "priority": 1, "date": ""}}}"#;
        fs::write(paths.tasks_path(), populated).unwrap();
        fs::write(paths.history_path(), r#"{"general": ["b"]}"#).unwrap();

        paths.ensure_initialized().unwrap();
        paths.ensure_initialized().unwrap();

        assert_eq!(fs::read_to_string(paths.tasks_path()).unwrap(), populated);
        assert_eq!(
            fs::read_to_string(paths.history_path()).unwrap(),
            r#"{"general": ["b"]}"#
        );
    }

    #[test]
    fn force_reset_overwrites_one_file() {
        let dir = tempdir().unwrap();
        let paths = StoragePaths::at(dir.path());
        paths.ensure_initialized().unwrap();
        fs::write(paths.config_path(), r#"{"first_time": false}"#).unwrap();
        fs::write(paths.history_path(), r#"{"x": ["y"]}"#).unwrap();

        paths.force_reset(StoreFile::Config).unwrap();

        assert_eq!(
            fs::read_to_string(paths.config_path()).unwrap(),
            StoreFile::Config.default_contents()
        );
        assert_eq!(
            fs::read_to_string(paths.history_path()).unwrap(),
            r#"{"x": ["y"]}"#
        );
    }
}
