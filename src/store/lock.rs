use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::error::{Result, TodoError};

const LOCK_ATTEMPTS: u32 = 25;
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(20);

/// Acquire an exclusive lock on a file, returning the locked File handle.
/// Retries briefly before giving up with `Locked`.
/// The lock is released when the File is dropped.
pub fn acquire_lock(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    for attempt in 1..=LOCK_ATTEMPTS {
        if file.try_lock_exclusive().is_ok() {
            tracing::trace!(path = %path.display(), attempt, "lock acquired");
            return Ok(file);
        }
        if attempt < LOCK_ATTEMPTS {
            thread::sleep(LOCK_RETRY_DELAY);
        }
    }

    tracing::debug!(path = %path.display(), "lock still held after retries");
    Err(TodoError::Locked(path.display().to_string()))
}

/// Release lock explicitly (normally handled by Drop).
pub fn release_lock(file: File) -> Result<()> {
    FileExt::unlock(&file)?;
    Ok(())
}
