use crate::error::Result;
use crate::output::{self, Format};
use crate::store::paths::StoragePaths;
use crate::store::repo::Repo;

pub fn add(paths: StoragePaths, name: &str, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    if !repo.tasks.create_folder(name)? {
        eprintln!("folder '{name}' already exists");
    }
    output::print_folders(&repo.tasks.folder_names()?, format)
}

pub fn rename(paths: StoragePaths, old_name: &str, new_name: &str, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    if !repo.tasks.rename_folder(old_name, new_name)? {
        eprintln!("folder '{old_name}' not renamed: it is missing or '{new_name}' already exists");
    }
    output::print_folders(&repo.tasks.folder_names()?, format)
}

pub fn list(paths: StoragePaths, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    output::print_folders(&repo.tasks.folder_names()?, format)
}
