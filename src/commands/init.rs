use crate::error::Result;
use crate::store::paths::StoragePaths;
use crate::store::repo::Repo;

pub fn run(paths: StoragePaths) -> Result<()> {
    let repo = Repo::open(paths)?;
    if repo.config.load()?.first_time {
        repo.config.set("first_time", false)?;
        eprintln!("Initialized task store in {}", repo.paths.dir().display());
    } else {
        eprintln!("Task store already initialized in {}", repo.paths.dir().display());
    }
    Ok(())
}
