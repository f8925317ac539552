use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_seed(db_path: &Path, path: Option<PathBuf>) -> Result<(), CliError> {
    let seed_path = path.unwrap_or_else(super::default_seed_path);
    if !seed_path.exists() {
        return Err(CliError::invalid_argument(format!(
            "seed data not found at {}",
            seed_path.display()
        )));
    }

    let mut store = super::open_store(db_path)?;
    let stats = store.seed_from_yaml(&seed_path)?;

    log::info!(
        "{}",
        "Seed complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Source:  {}", seed_path.display());
    log::info!("  Added:   {:>4}", stats.added);
    log::info!("  Skipped: {:>4} (already in diary)", stats.skipped);
    Ok(())
}
