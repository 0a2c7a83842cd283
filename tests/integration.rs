use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;
use todo_store::error::TodoError;
use todo_store::model::{DEFAULT_FOLDER, Priority, Task, TaskDate, TaskPatch};
use todo_store::store::paths::StoragePaths;
use todo_store::store::repo::Repo;

fn open_repo(dir: &std::path::Path) -> Repo {
    Repo::open(StoragePaths::at(dir.join(".todo"))).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_task_lifecycle() {
    let dir = tempdir().unwrap();
    let repo = open_repo(dir.path());

    let mut task = Task::new("pay rent")
        .with_priority(Priority::Urgent)
        .create(&repo.tasks)
        .unwrap();

    task.change_date(&repo.tasks, day(2024, 10, 1)).unwrap();
    task.switch_status(&repo.tasks).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(repo.paths.tasks_path()).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!({
            "general": {
                "pay rent": {"achieved": true, "priority": 1, "date": "2024-10-1"}
            }
        })
    );

    task.switch_folder(&repo.tasks, "home").unwrap();
    let snapshot = repo.startup().unwrap().tasks;
    assert!(snapshot[DEFAULT_FOLDER].tasks.is_empty());
    assert_eq!(snapshot["home"].tasks["pay rent"], task);

    task.delete(&repo.tasks).unwrap();
    assert!(repo.tasks.load_all().unwrap()["home"].tasks.is_empty());
}

#[test]
fn test_bulk_clean_moves_completed_into_history() {
    let dir = tempdir().unwrap();
    let repo = open_repo(dir.path());
    repo.tasks.create_folder("work").unwrap();

    Task::new("a").with_achieved(true).create(&repo.tasks).unwrap();
    Task::new("b").create(&repo.tasks).unwrap();
    Task::new("c")
        .in_folder("work")
        .with_achieved(true)
        .create(&repo.tasks)
        .unwrap();

    let cleaned = repo.clean_completed(None).unwrap();
    assert_eq!(
        cleaned,
        vec![
            ("general".to_string(), "a".to_string()),
            ("work".to_string(), "c".to_string()),
        ]
    );

    let startup = repo.startup().unwrap();
    assert_eq!(startup.tasks[DEFAULT_FOLDER].tasks.len(), 1);
    assert!(startup.tasks[DEFAULT_FOLDER].tasks.contains_key("b"));
    assert!(startup.tasks["work"].tasks.is_empty());
    assert_eq!(startup.history["general"], vec!["a".to_string()]);
    assert_eq!(startup.history["work"], vec!["c".to_string()]);

    // A second clean finds nothing and leaves history alone.
    assert!(repo.clean_completed(None).unwrap().is_empty());
    assert_eq!(repo.history.load().unwrap(), startup.history);
}

#[test]
fn test_update_with_new_name_replaces_entry() {
    let dir = tempdir().unwrap();
    let repo = open_repo(dir.path());
    let mut task = Task::new("draft").create(&repo.tasks).unwrap();

    task.update(
        &repo.tasks,
        TaskPatch {
            name: Some("final".to_string()),
            date: Some(TaskDate::new(day(2025, 1, 2))),
            priority: Some(Priority::VeryUrgent),
        },
    )
    .unwrap();

    let general = &repo.tasks.load_all().unwrap()[DEFAULT_FOLDER];
    assert!(!general.tasks.contains_key("draft"));
    let stored = &general.tasks["final"];
    assert_eq!(stored.priority(), Priority::VeryUrgent);
    assert_eq!(stored.date().to_string(), "2025-1-2");
}

#[test]
fn test_names_stay_unique_within_a_folder() {
    let dir = tempdir().unwrap();
    let repo = open_repo(dir.path());
    Task::new("dup").create(&repo.tasks).unwrap();

    let err = Task::new("dup").create(&repo.tasks).unwrap_err();
    assert!(matches!(err, TodoError::TaskExists { .. }));
    assert_eq!(err.code(), "task_exists");

    let mut other = Task::new("other").create(&repo.tasks).unwrap();
    let err = other.rename(&repo.tasks, "dup").unwrap_err();
    assert!(matches!(err, TodoError::TaskExists { .. }));
    assert_eq!(other.name(), "other");

    assert_eq!(repo.tasks.load_all().unwrap()[DEFAULT_FOLDER].tasks.len(), 2);
}

#[test]
fn test_same_name_allowed_in_different_folders() {
    let dir = tempdir().unwrap();
    let repo = open_repo(dir.path());
    repo.tasks.create_folder("home").unwrap();

    Task::new("shop").create(&repo.tasks).unwrap();
    Task::new("shop").in_folder("home").create(&repo.tasks).unwrap();

    let mut moved = repo.tasks.get("home", "shop").unwrap();
    let err = moved.switch_folder(&repo.tasks, DEFAULT_FOLDER).unwrap_err();
    assert!(matches!(err, TodoError::TaskExists { .. }));
    assert_eq!(moved.folder(), "home");
}

#[test]
fn test_startup_is_idempotent() {
    let dir = tempdir().unwrap();
    let paths = StoragePaths::at(dir.path().join(".todo"));

    let first = Repo::open(paths.clone()).unwrap();
    let before: Vec<String> = [paths.tasks_path(), paths.history_path(), paths.config_path()]
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();
    let first_startup = first.startup().unwrap();

    let second = Repo::open(paths.clone()).unwrap();
    let after: Vec<String> = [paths.tasks_path(), paths.history_path(), paths.config_path()]
        .iter()
        .map(|p| fs::read_to_string(p).unwrap())
        .collect();

    assert_eq!(before, after);
    assert_eq!(first_startup.tasks, second.startup().unwrap().tasks);
}

#[test]
fn test_folder_rename_keeps_tasks() {
    let dir = tempdir().unwrap();
    let repo = open_repo(dir.path());
    repo.tasks.create_folder("old").unwrap();
    Task::new("t").in_folder("old").create(&repo.tasks).unwrap();

    assert!(repo.tasks.rename_folder("old", "new").unwrap());
    assert!(!repo.tasks.rename_folder("missing", "x").unwrap());

    let snapshot = repo.tasks.load_all().unwrap();
    assert!(!snapshot.contains_key("old"));
    assert_eq!(snapshot["new"].tasks["t"].folder(), "new");
}
