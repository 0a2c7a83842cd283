use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("cannot determine the home directory for the task store")]
    HomeDirUnavailable,

    #[error("folder '{0}' not found")]
    FolderNotFound(String),

    #[error("task '{name}' not found in folder '{folder}'")]
    TaskNotFound { folder: String, name: String },

    #[error("task '{name}' already exists in folder '{folder}'")]
    TaskExists { folder: String, name: String },

    #[error("invalid date '{0}' (expected Y-M-D)")]
    InvalidDate(String),

    #[error("invalid priority {0} (expected 0, 1 or 2)")]
    InvalidPriority(i64),

    #[error("unknown config key '{0}'")]
    UnknownConfigKey(String),

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::HomeDirUnavailable => "home_dir_unavailable",
            Self::FolderNotFound(_) => "folder_not_found",
            Self::TaskNotFound { .. } => "task_not_found",
            Self::TaskExists { .. } => "task_exists",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidPriority(_) => "invalid_priority",
            Self::UnknownConfigKey(_) => "unknown_config_key",
            Self::Locked(_) => "locked",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    pub(crate) fn task_not_found(folder: &str, name: &str) -> Self {
        Self::TaskNotFound {
            folder: folder.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn task_exists(folder: &str, name: &str) -> Self {
        Self::TaskExists {
            folder: folder.to_string(),
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
