use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

const TOP_GENRES: usize = 5;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No diary database found at {}", db_path.display());
        log::info!("Run 'moviediary seed' or 'moviediary add' to create one.");
        return Ok(());
    }

    let store = super::open_store(db_path)?;
    let stats = store.stats()?;
    let genres = store.genre_counts()?;

    log::info!(
        "{}",
        "Movie Diary Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Movies:         {:>6}", stats.movies);
    log::info!("  Watched:        {:>6}", stats.watched);
    log::info!("  Wishlist:       {:>6}", stats.wishlist);
    log::info!("  Rated:          {:>6}", stats.rated);
    match stats.average_rating {
        Some(avg) => log::info!("  Average rating: {:>6.1}", avg),
        None => log::info!("  Average rating: {:>6}", "-"),
    }
    log::info!("  Genres:         {:>6}", stats.genres);

    if !genres.is_empty() {
        crate::log_blank();
        log::info!("  Top genres:");
        for g in genres.iter().take(TOP_GENRES) {
            log::info!(
                "    {} {:>4}",
                format!("{:<16}", g.genre).if_supports_color(Stdout, |t| t.cyan()),
                g.movies
            );
        }
    }
    Ok(())
}
