use crate::error::Result;
use crate::model::{Priority, Task, TaskDate, TaskPatch};
use crate::output::{self, Format};
use crate::store::paths::StoragePaths;
use crate::store::repo::Repo;

pub struct AddArgs {
    pub name: String,
    pub folder: String,
    pub priority: Priority,
    pub date: Option<TaskDate>,
    pub done: bool,
}

pub fn add(paths: StoragePaths, args: AddArgs, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    let task = Task::new(args.name)
        .in_folder(args.folder)
        .with_priority(args.priority)
        .with_date(args.date.unwrap_or(TaskDate::UNSET))
        .with_achieved(args.done)
        .create(&repo.tasks)?;
    output::print_task(&task, format)
}

pub fn toggle(paths: StoragePaths, folder: &str, name: &str, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    let mut task = repo.task(folder, name)?;
    task.switch_status(&repo.tasks)?;
    output::print_task(&task, format)
}

/// Copy a task under a new name; the old entry stays.
pub fn rename(
    paths: StoragePaths,
    folder: &str,
    name: &str,
    new_name: String,
    format: Format,
) -> Result<()> {
    let repo = Repo::open(paths)?;
    let mut task = repo.task(folder, name)?;
    task.rename(&repo.tasks, new_name)?;
    output::print_task(&task, format)
}

pub fn edit(
    paths: StoragePaths,
    folder: &str,
    name: &str,
    patch: TaskPatch,
    format: Format,
) -> Result<()> {
    let repo = Repo::open(paths)?;
    let mut task = repo.task(folder, name)?;
    if !patch.is_empty() {
        task.update(&repo.tasks, patch)?;
    }
    output::print_task(&task, format)
}

/// Set the due date, or clear it when `date` is `None`.
pub fn date(
    paths: StoragePaths,
    folder: &str,
    name: &str,
    date: Option<TaskDate>,
    format: Format,
) -> Result<()> {
    let repo = Repo::open(paths)?;
    let mut task = repo.task(folder, name)?;
    match date.and_then(|d| d.get()) {
        Some(day) => task.change_date(&repo.tasks, day)?,
        None => task.clear_date(&repo.tasks)?,
    }
    output::print_task(&task, format)
}

pub fn move_to(
    paths: StoragePaths,
    folder: &str,
    name: &str,
    target: String,
    format: Format,
) -> Result<()> {
    let repo = Repo::open(paths)?;
    let mut task = repo.task(folder, name)?;
    task.switch_folder(&repo.tasks, target)?;
    output::print_task(&task, format)
}

pub fn remove(paths: StoragePaths, folder: &str, names: &[String], format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    let targets: Vec<(String, String)> = names
        .iter()
        .map(|name| (folder.to_string(), name.clone()))
        .collect();
    repo.tasks.delete_tasks(&targets)?;
    output::print_removed("deleted", &targets, format)
}
