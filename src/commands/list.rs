use crate::error::{Result, TodoError};
use crate::output::{self, Format};
use crate::store::paths::StoragePaths;
use crate::store::repo::Repo;

pub fn run(paths: StoragePaths, folder: Option<String>, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    let mut snapshot = repo.startup()?.tasks;
    if let Some(name) = folder {
        let only = snapshot
            .remove(&name)
            .ok_or(TodoError::FolderNotFound(name))?;
        snapshot.clear();
        snapshot.insert(only.name.clone(), only);
    }
    output::print_snapshot(&snapshot, format)
}
