use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Result, TodoError};
use crate::model::{DEFAULT_FOLDER, Folder, RawStore, Snapshot, Task, TaskRecord};
use crate::store::files;
use crate::store::history::HistoryStore;
use crate::store::lock;
use crate::store::paths::{StoragePaths, StoreFile};

/// Load/save of the folder -> task collection in `tasks.json`.
///
/// Every write rewrites the whole file. Mutations run as one cycle: take the
/// tasks lock, re-read the file, apply the change, save, release.
#[derive(Debug, Clone)]
pub struct TaskStore {
    paths: StoragePaths,
}

impl TaskStore {
    pub fn open(paths: &StoragePaths) -> Self {
        Self {
            paths: paths.clone(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.paths.tasks_path()
    }

    /// Typed snapshot of every folder. Missing file gives an empty snapshot.
    pub fn load_all(&self) -> Result<Snapshot> {
        let raw = self.load_raw()?;
        Ok(raw
            .iter()
            .map(|(name, records)| (name.clone(), Folder::from_records(name, records)))
            .collect())
    }

    /// Record-level view of the file, healing it first if it is corrupt.
    pub fn load_raw(&self) -> Result<RawStore> {
        let raw = files::read_or_reset(&self.path(), StoreFile::Tasks.default_contents())?;
        Ok(raw.unwrap_or_default())
    }

    pub fn save_all(&self, store: &RawStore) -> Result<()> {
        files::write_json(&self.path(), store)?;
        tracing::debug!(folders = store.len(), "saved task store");
        Ok(())
    }

    /// Fetch one task from a fresh read.
    pub fn get(&self, folder: &str, name: &str) -> Result<Task> {
        let raw = self.load_raw()?;
        let record = raw
            .get(folder)
            .ok_or_else(|| TodoError::FolderNotFound(folder.to_string()))?
            .get(name)
            .ok_or_else(|| TodoError::task_not_found(folder, name))?;
        Ok(Task::from_record(folder, name, record))
    }

    pub fn folder_names(&self) -> Result<Vec<String>> {
        Ok(self.load_raw()?.into_keys().collect())
    }

    /// Run one lock/load/mutate/save cycle. Nothing is written if `apply` fails.
    pub(crate) fn mutate<T>(&self, apply: impl FnOnce(&mut RawStore) -> Result<T>) -> Result<T> {
        self.cycle(|raw| apply(raw).map(|out| (out, true)))
    }

    /// Like `mutate`, but `apply` reports whether anything changed; unchanged stores are not rewritten.
    fn cycle<T>(&self, apply: impl FnOnce(&mut RawStore) -> Result<(T, bool)>) -> Result<T> {
        let lock_file = lock::acquire_lock(&self.paths.lock_path(StoreFile::Tasks))?;
        let mut raw = self.load_raw()?;
        let (out, changed) = apply(&mut raw)?;
        if changed {
            self.save_all(&raw)?;
        }
        lock::release_lock(lock_file)?;
        Ok(out)
    }

    pub fn delete_all_tasks(&self) -> Result<()> {
        self.mutate(|raw| {
            *raw = default_store();
            Ok(())
        })?;
        tracing::info!("deleted all tasks");
        Ok(())
    }

    pub fn delete_task(&self, folder: &str, name: &str) -> Result<()> {
        self.mutate(|raw| remove_entry(raw, folder, name).map(|_| ()))
    }

    /// Remove several tasks in one cycle. If any pair is missing, nothing is removed.
    pub fn delete_tasks(&self, tasks: &[(String, String)]) -> Result<()> {
        self.mutate(|raw| {
            for (folder, name) in tasks {
                remove_entry(raw, folder, name)?;
            }
            Ok(())
        })?;
        tracing::info!(count = tasks.len(), "deleted tasks");
        Ok(())
    }

    /// Move a folder's tasks to a new key. Returns `false` (and writes nothing)
    /// unless `old_name` exists and `new_name` does not.
    pub fn rename_folder(&self, old_name: &str, new_name: &str) -> Result<bool> {
        let renamed = self.cycle(|raw| {
            if !raw.contains_key(old_name) || raw.contains_key(new_name) {
                return Ok((false, false));
            }
            if let Some(tasks) = raw.remove(old_name) {
                raw.insert(new_name.to_string(), tasks);
            }
            raw.entry(DEFAULT_FOLDER.to_string()).or_default();
            Ok((true, true))
        })?;
        if renamed {
            tracing::info!(from = old_name, to = new_name, "renamed folder");
        }
        Ok(renamed)
    }

    /// Add an empty folder. Returns `false` if it already exists.
    pub fn create_folder(&self, name: &str) -> Result<bool> {
        self.cycle(|raw| {
            if raw.contains_key(name) {
                return Ok((false, false));
            }
            raw.insert(name.to_string(), BTreeMap::new());
            Ok((true, true))
        })
    }

    /// Remove completed tasks (from one folder, or all) and append their names
    /// to the history ledger. History is written before the tasks are dropped,
    /// so an interrupted clean can only over-report in history.
    pub fn clean_completed(
        &self,
        folder: Option<&str>,
        history: &HistoryStore,
    ) -> Result<Vec<(String, String)>> {
        let cleaned = self.cycle(|raw| {
            if let Some(folder) = folder
                && !raw.contains_key(folder)
            {
                return Err(TodoError::FolderNotFound(folder.to_string()));
            }

            let cleaned: Vec<(String, String)> = raw
                .iter()
                .filter(|(name, _)| folder.is_none_or(|f| f == name.as_str()))
                .flat_map(|(folder_name, tasks)| {
                    tasks
                        .iter()
                        .filter(|(_, record)| record.achieved)
                        .map(move |(task_name, _)| (folder_name.clone(), task_name.clone()))
                })
                .collect();
            if cleaned.is_empty() {
                return Ok((cleaned, false));
            }

            history.record_completions(&cleaned)?;
            for (folder_name, task_name) in &cleaned {
                if let Some(tasks) = raw.get_mut(folder_name) {
                    tasks.remove(task_name);
                }
            }
            Ok((cleaned, true))
        })?;
        tracing::info!(count = cleaned.len(), "cleaned completed tasks");
        Ok(cleaned)
    }
}

pub(crate) fn default_store() -> RawStore {
    BTreeMap::from([(DEFAULT_FOLDER.to_string(), BTreeMap::new())])
}

pub(crate) fn folder_mut<'a>(
    raw: &'a mut RawStore,
    folder: &str,
) -> Result<&'a mut BTreeMap<String, TaskRecord>> {
    raw.get_mut(folder)
        .ok_or_else(|| TodoError::FolderNotFound(folder.to_string()))
}

pub(crate) fn remove_entry(raw: &mut RawStore, folder: &str, name: &str) -> Result<TaskRecord> {
    folder_mut(raw, folder)?
        .remove(name)
        .ok_or_else(|| TodoError::task_not_found(folder, name))
}
