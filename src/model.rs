use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Folder that exists in every initialized store.
pub const DEFAULT_FOLDER: &str = "general";

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(try_from = "i64", into = "u8")]
#[clap(rename_all = "kebab-case")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
    VeryUrgent,
}

impl TryFrom<i64> for Priority {
    type Error = TodoError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Urgent),
            2 => Ok(Self::VeryUrgent),
            other => Err(TodoError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Normal => 0,
            Priority::Urgent => 1,
            Priority::VeryUrgent => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Urgent => write!(f, "urgent"),
            Self::VeryUrgent => write!(f, "very urgent"),
        }
    }
}

/// Optional calendar date stored as an unpadded `Y-M-D` string, or `""` when unset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub struct TaskDate(Option<NaiveDate>);

impl TaskDate {
    pub const UNSET: Self = Self(None);

    pub fn new(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    pub fn get(&self) -> Option<NaiveDate> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

fn parse_ymd(input: &str) -> Option<NaiveDate> {
    let mut parts = input.trim().split('-');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

impl From<NaiveDate> for TaskDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

// Lenient: anything that is not a real date reads back as unset.
impl From<String> for TaskDate {
    fn from(raw: String) -> Self {
        Self(parse_ymd(&raw))
    }
}

// Disk form. `null`, numbers and other non-strings read as unset.
impl From<serde_json::Value> for TaskDate {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::String(text) => Self::from(text),
            _ => Self::UNSET,
        }
    }
}

impl From<TaskDate> for String {
    fn from(date: TaskDate) -> Self {
        date.to_string()
    }
}

impl FromStr for TaskDate {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::UNSET);
        }
        parse_ymd(s)
            .map(Self::new)
            .ok_or_else(|| TodoError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}-{}-{}", date.year(), date.month(), date.day()),
            None => Ok(()),
        }
    }
}

/// The persisted value stored under `tasks[folder][name]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordRepr")]
pub struct TaskRecord {
    pub achieved: bool,
    pub priority: Priority,
    pub date: TaskDate,
}

/// Accepted on-disk shapes. The first release stored only the completion flag.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordRepr {
    Legacy(bool),
    Full {
        #[serde(default)]
        achieved: bool,
        #[serde(default)]
        priority: Priority,
        #[serde(default)]
        date: TaskDate,
    },
}

impl From<RecordRepr> for TaskRecord {
    fn from(repr: RecordRepr) -> Self {
        match repr {
            RecordRepr::Legacy(achieved) => Self {
                achieved,
                ..Self::default()
            },
            RecordRepr::Full {
                achieved,
                priority,
                date,
            } => Self {
                achieved,
                priority,
                date,
            },
        }
    }
}

/// Folder name -> task name -> record. Exactly what `tasks.json` holds.
pub type RawStore = BTreeMap<String, BTreeMap<String, TaskRecord>>;

/// Typed, read-only projection of the task file.
pub type Snapshot = BTreeMap<String, Folder>;

/// Folder name -> names of tasks cleaned out of it, oldest first.
pub type History = BTreeMap<String, Vec<String>>;

/// A task bound to a name and folder.
///
/// A `Task` is a disposable view of one entry in the task file. Its mutating
/// methods (see `store::entity`) each re-read the file, apply the change and
/// write the file back, and only update `self` once the write succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub(crate) name: String,
    pub(crate) folder: String,
    pub(crate) achieved: bool,
    pub(crate) priority: Priority,
    pub(crate) date: TaskDate,
}

impl Task {
    /// A pending, normal-priority, undated task in [`DEFAULT_FOLDER`]. Nothing is written.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: DEFAULT_FOLDER.to_string(),
            achieved: false,
            priority: Priority::Normal,
            date: TaskDate::UNSET,
        }
    }

    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_date(mut self, date: TaskDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_achieved(mut self, achieved: bool) -> Self {
        self.achieved = achieved;
        self
    }

    pub fn from_record(folder: &str, name: &str, record: &TaskRecord) -> Self {
        Self {
            name: name.to_string(),
            folder: folder.to_string(),
            achieved: record.achieved,
            priority: record.priority,
            date: record.date,
        }
    }

    pub fn record(&self) -> TaskRecord {
        TaskRecord {
            achieved: self.achieved,
            priority: self.priority,
            date: self.date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn achieved(&self) -> bool {
        self.achieved
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn date(&self) -> TaskDate {
        self.date
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    pub name: String,
    pub tasks: BTreeMap<String, Task>,
}

impl Folder {
    pub fn from_records(name: &str, records: &BTreeMap<String, TaskRecord>) -> Self {
        let tasks = records
            .iter()
            .map(|(task_name, record)| {
                (task_name.clone(), Task::from_record(name, task_name, record))
            })
            .collect();
        Self {
            name: name.to_string(),
            tasks,
        }
    }

    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values().filter(|task| task.achieved)
    }
}

/// Structured edit applied by `Task::update`. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub date: Option<TaskDate>,
    pub priority: Option<Priority>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.date.is_none() && self.priority.is_none()
    }
}

fn default_true() -> bool {
    true
}

/// Application flags persisted in `config.ini`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFlags {
    #[serde(default = "default_true")]
    pub first_time: bool,
    #[serde(default)]
    pub auto_clean: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
}

impl Default for ConfigFlags {
    fn default() -> Self {
        Self {
            first_time: true,
            auto_clean: false,
            notifications: true,
        }
    }
}

impl ConfigFlags {
    pub const KEYS: [&'static str; 3] = ["first_time", "auto_clean", "notifications"];

    pub fn get(&self, key: &str) -> Result<bool, TodoError> {
        match key {
            "first_time" => Ok(self.first_time),
            "auto_clean" => Ok(self.auto_clean),
            "notifications" => Ok(self.notifications),
            other => Err(TodoError::UnknownConfigKey(other.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: bool) -> Result<(), TodoError> {
        let slot = match key {
            "first_time" => &mut self.first_time,
            "auto_clean" => &mut self.auto_clean,
            "notifications" => &mut self.notifications,
            other => return Err(TodoError::UnknownConfigKey(other.to_string())),
        };
        *slot = value;
        Ok(())
    }
}
