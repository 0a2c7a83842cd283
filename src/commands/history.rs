use crate::error::Result;
use crate::model::History;
use crate::output::{self, Format};
use crate::store::paths::StoragePaths;
use crate::store::repo::Repo;

pub fn run(paths: StoragePaths, folder: Option<String>, format: Format) -> Result<()> {
    let repo = Repo::open(paths)?;
    let history = match folder {
        Some(name) => {
            let names = repo.history.names(&name)?;
            History::from([(name, names)])
        }
        None => repo.history.load()?,
    };
    output::print_history(&history, format)
}
