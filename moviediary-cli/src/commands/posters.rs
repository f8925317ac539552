use std::path::Path;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use moviediary_present::{HttpPosterLoader, PosterDisplay, resolve_posters, to_view_models};

use crate::CliError;

/// Fetch every poster in the diary and report which ones load.
pub(crate) fn run_posters(db_path: &Path, timeout_secs: u64) -> Result<(), CliError> {
    let store = super::open_store(db_path)?;
    let entries: Vec<_> = store.list()?.collect();
    if entries.is_empty() {
        log::info!("No movies found.");
        return Ok(());
    }
    let cards = to_view_models(&entries);

    let loader = HttpPosterLoader::with_timeout(Duration::from_secs(timeout_secs))
        .map_err(|e| CliError::runtime(format!("Failed to create HTTP client: {e}")))?;
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;

    log::info!("Checking {} posters...", cards.len());
    let displays = rt.block_on(resolve_posters(&loader, &cards));

    let mut loaded = 0;
    for (card, display) in cards.iter().zip(&displays) {
        match display {
            PosterDisplay::Image(image) => {
                loaded += 1;
                log::info!(
                    "  {} {} ({}x{})",
                    "OK".if_supports_color(Stdout, |t| t.green()),
                    super::truncate_str(&card.title, 48),
                    image.width,
                    image.height,
                );
            }
            PosterDisplay::Placeholder => {
                let reason = if card.poster.is_placeholder() {
                    "no poster URL"
                } else {
                    "failed to load"
                };
                log::info!(
                    "  {} {} ({})",
                    "--".if_supports_color(Stdout, |t| t.yellow()),
                    super::truncate_str(&card.title, 48),
                    reason.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    crate::log_blank();
    log::info!(
        "{} loaded, {} placeholder",
        loaded,
        displays.len() - loaded
    );
    Ok(())
}
