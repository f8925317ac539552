use std::path::Path;

use moviediary_catalog::types::MovieId;

use crate::CliError;

pub(crate) fn run_delete(db_path: &Path, id: i64) -> Result<(), CliError> {
    let id = MovieId(id);
    let mut store = super::open_store(db_path)?;
    let title = store.get(id)?.title;
    store.delete(id)?;
    log::info!("Deleted #{} {}", id, title);
    Ok(())
}
