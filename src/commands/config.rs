use crate::error::Result;
use crate::output::{self, Format};
use crate::store::paths::StoragePaths;
use crate::store::repo::Repo;

pub fn show(paths: StoragePaths, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    output::print_config(&repo.config.load()?, format)
}

pub fn set(paths: StoragePaths, key: &str, value: bool, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    let flags = repo.config.set(key, value)?;
    output::print_config(&flags, format)
}
