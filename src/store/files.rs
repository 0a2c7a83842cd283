use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Read a JSON file, replacing it with `default_contents` if it does not parse.
///
/// Returns `None` when the file does not exist. On a parse failure the file is
/// overwritten with the default and read once more, so a corrupt file never
/// surfaces as an error.
pub fn read_or_reset<T: DeserializeOwned>(path: &Path, default_contents: &str) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read(path)?;
    match serde_json::from_slice(&data) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "malformed store file, resetting to default"
            );
            write_atomic(path, default_contents.as_bytes())?;
            let data = fs::read(path)?;
            Ok(Some(serde_json::from_slice(&data)?))
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())
}

/// Replace `path` in one step: write and fsync a sibling staging file, then
/// rename it over the target. The staging name carries the process id.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let staging = staging_path(path);
    if let Err(err) = stage(&staging, contents).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }
    Ok(())
}

fn stage(staging: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(staging)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("store"));
    name.push(format!(".tmp.{}", std::process::id()));
    path.with_file_name(name)
}
