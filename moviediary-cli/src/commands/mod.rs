pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod delete;
pub(crate) mod edit;
pub(crate) mod list;
pub(crate) mod posters;
pub(crate) mod reset;
pub(crate) mod seed;
pub(crate) mod show;
pub(crate) mod stats;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use moviediary_catalog::types::{DiaryStatus, MovieEntry};
use moviediary_db::CatalogStore;
use moviediary_present::{MAX_STARS, MovieCard, to_view_model};

use crate::CliError;

/// Open (creating if needed) the catalog database.
pub(crate) fn open_store(db_path: &Path) -> Result<CatalogStore, CliError> {
    Ok(CatalogStore::open(db_path)?)
}

/// Default path for seed YAML data, relative to the current directory.
pub(crate) fn default_seed_path() -> PathBuf {
    PathBuf::from("catalog").join("movies.yaml")
}

/// Truncate a string to a maximum number of characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

/// Render a star count as a five-character bar.
pub(crate) fn star_bar(stars: u8) -> String {
    let filled = stars.min(MAX_STARS) as usize;
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(MAX_STARS as usize - filled)
    )
}

/// One-line summary of a card, as shown in lists.
pub(crate) fn print_card(card: &MovieCard) {
    let year = card
        .year_label
        .as_deref()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    let status = match card.status {
        DiaryStatus::Watched => card
            .watched_label
            .as_deref()
            .unwrap_or("Watched")
            .if_supports_color(Stdout, |t| t.green())
            .to_string(),
        DiaryStatus::Wishlist => "Wishlist"
            .if_supports_color(Stdout, |t| t.yellow())
            .to_string(),
    };

    log::info!(
        "  {} {}{}",
        format!("#{:<4}", card.id.0).if_supports_color(Stdout, |t| t.dimmed()),
        truncate_str(&card.title, 48).if_supports_color(Stdout, |t| t.bold()),
        year,
    );
    log::info!(
        "        {} {:<9} {}",
        star_bar(card.star_count).if_supports_color(Stdout, |t| t.yellow()),
        card.rating_label,
        status,
    );
    if !card.genres_label.is_empty() {
        log::info!(
            "        {}",
            card.genres_label.if_supports_color(Stdout, |t| t.cyan())
        );
    }
}

/// Print entries as cards, or as pretty JSON to stdout.
pub(crate) fn print_entries(entries: &[MovieEntry], json: bool) -> Result<(), CliError> {
    if json {
        let out = serde_json::to_string_pretty(entries)
            .map_err(|e| CliError::other(format!("Failed to serialize movies: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if entries.is_empty() {
        log::info!("No movies found.");
        return Ok(());
    }
    for entry in entries {
        print_card(&to_view_model(entry));
    }
    crate::log_blank();
    log::info!(
        "{} movie{}",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    );
    Ok(())
}


#[cfg(test)]
#[path = "tests/round_trip_tests.rs"]
mod round_trip_tests;
