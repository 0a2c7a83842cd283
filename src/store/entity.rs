//! Persisting mutations on [`Task`].
//!
//! Each method is one cycle against the task file: lock, re-read, write this
//! task's record at `[folder][name]`, save the whole file. `self` only changes
//! once the save succeeded, so a failed call leaves the caller's view intact.

use std::mem;

use chrono::NaiveDate;

use crate::error::{Result, TodoError};
use crate::model::{Priority, Task, TaskDate, TaskPatch};
use crate::store::tasks::{TaskStore, folder_mut, remove_entry};

impl Task {
    /// Persist this task as a new entry.
    ///
    /// Fails with `TaskExists` rather than overwriting an entry of the same
    /// name, and with `FolderNotFound` if the folder has not been created.
    pub fn create(self, store: &TaskStore) -> Result<Task> {
        store.mutate(|raw| {
            let tasks = folder_mut(raw, &self.folder)?;
            if tasks.contains_key(&self.name) {
                return Err(TodoError::task_exists(&self.folder, &self.name));
            }
            tasks.insert(self.name.clone(), self.record());
            Ok(())
        })?;
        tracing::debug!(folder = %self.folder, name = %self.name, "created task");
        Ok(self)
    }

    pub fn switch_status(&mut self, store: &TaskStore) -> Result<()> {
        let mut next = self.clone();
        next.achieved = !self.achieved;
        self.commit(store, next)
    }

    /// Persist under `new_name`. The entry under the previous name is kept;
    /// use [`Task::update`] to move an entry to a new name.
    pub fn rename(&mut self, store: &TaskStore, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        if new_name == self.name {
            return Ok(());
        }
        let mut next = self.clone();
        next.name = new_name;
        store.mutate(|raw| {
            let tasks = folder_mut(raw, &next.folder)?;
            if tasks.contains_key(&next.name) {
                return Err(TodoError::task_exists(&next.folder, &next.name));
            }
            tasks.insert(next.name.clone(), next.record());
            Ok(())
        })?;
        *self = next;
        Ok(())
    }

    /// Apply a patch and persist once. A new name replaces the old entry.
    pub fn update(&mut self, store: &TaskStore, patch: TaskPatch) -> Result<()> {
        let mut next = self.clone();
        let previous_name = match patch.name {
            Some(name) if name != self.name => Some(mem::replace(&mut next.name, name)),
            _ => None,
        };
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }

        store.mutate(|raw| {
            if let Some(old) = &previous_name {
                remove_entry(raw, &next.folder, old)?;
            }
            let tasks = folder_mut(raw, &next.folder)?;
            if previous_name.is_some() && tasks.contains_key(&next.name) {
                return Err(TodoError::task_exists(&next.folder, &next.name));
            }
            tasks.insert(next.name.clone(), next.record());
            Ok(())
        })?;
        *self = next;
        Ok(())
    }

    /// Move to another folder, creating it if needed.
    pub fn switch_folder(&mut self, store: &TaskStore, new_folder: impl Into<String>) -> Result<()> {
        let new_folder = new_folder.into();
        if new_folder == self.folder {
            return Ok(());
        }
        let mut next = self.clone();
        next.folder = new_folder;

        store.mutate(|raw| {
            if raw
                .get(&next.folder)
                .is_some_and(|tasks| tasks.contains_key(&next.name))
            {
                return Err(TodoError::task_exists(&next.folder, &next.name));
            }
            remove_entry(raw, &self.folder, &self.name)?;
            raw.entry(next.folder.clone())
                .or_default()
                .insert(next.name.clone(), next.record());
            Ok(())
        })?;
        tracing::debug!(name = %self.name, from = %self.folder, to = %next.folder, "moved task");
        *self = next;
        Ok(())
    }

    pub fn delete(&self, store: &TaskStore) -> Result<()> {
        store.delete_task(&self.folder, &self.name)
    }

    pub fn change_date(&mut self, store: &TaskStore, date: NaiveDate) -> Result<()> {
        let mut next = self.clone();
        next.date = TaskDate::new(date);
        self.commit(store, next)
    }

    pub fn clear_date(&mut self, store: &TaskStore) -> Result<()> {
        let mut next = self.clone();
        next.date = TaskDate::UNSET;
        self.commit(store, next)
    }

    pub fn set_priority(&mut self, store: &TaskStore, priority: Priority) -> Result<()> {
        let mut next = self.clone();
        next.priority = priority;
        self.commit(store, next)
    }

    /// Write `next` at its `[folder][name]`, then adopt it.
    fn commit(&mut self, store: &TaskStore, next: Task) -> Result<()> {
        store.mutate(|raw| {
            folder_mut(raw, &next.folder)?.insert(next.name.clone(), next.record());
            Ok(())
        })?;
        *self = next;
        Ok(())
    }
}
