use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Delete the diary database. WAL side files go with it.
pub(crate) fn run_reset(db_path: &Path, confirm: bool) -> Result<(), CliError> {
    if !confirm {
        log::warn!(
            "This will permanently delete the diary database at:\n  {}",
            db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  moviediary reset --confirm");
        return Ok(());
    }

    if !db_path.exists() {
        log::info!("No diary database found at {}", db_path.display());
        log::info!("Nothing to reset.");
        return Ok(());
    }

    std::fs::remove_file(db_path)
        .map_err(|e| CliError::other(format!("Failed to delete {}: {}", db_path.display(), e)))?;
    for suffix in ["-wal", "-shm"] {
        let mut side = db_path.as_os_str().to_owned();
        side.push(suffix);
        let side = Path::new(&side);
        if side.exists() {
            std::fs::remove_file(side)?;
        }
    }

    log::info!(
        "{}",
        "Diary database deleted.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", db_path.display());
    crate::log_blank();
    log::info!("Run 'moviediary seed' to load the sample movies again.");
    Ok(())
}
