use crate::error::Result;
use crate::output::{self, Format};
use crate::store::paths::StoragePaths;
use crate::store::repo::Repo;

pub fn run(paths: StoragePaths, folder: Option<String>, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    let cleaned = repo.clean_completed(folder.as_deref())?;
    output::print_removed("cleaned", &cleaned, format)
}

/// Drop every task and folder, leaving only an empty `general`.
pub fn reset(paths: StoragePaths, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    repo.tasks.delete_all_tasks()?;
    output::print_snapshot(&repo.tasks.load_all()?, format)
}
