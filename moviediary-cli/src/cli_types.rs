//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use moviediary_catalog::SortBy;
use moviediary_catalog::types::DiaryStatus;

#[derive(Parser)]
#[command(name = "moviediary")]
#[command(about = "Keep a diary of the movies you watched and want to watch", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database to use (overrides settings.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fields for a new diary entry.
#[derive(Args, Clone)]
pub(crate) struct AddArgs {
    /// Movie title
    pub title: String,

    /// Poster image URL
    #[arg(long)]
    pub poster: Option<String>,

    /// Rating from 0 to 10
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Date watched (YYYY-MM-DD or "today"); omit to add to the wishlist
    #[arg(short, long, value_parser = parse_watched_date)]
    pub watched: Option<NaiveDate>,

    /// Comma-separated genres (e.g., "Sci-Fi, Action")
    #[arg(short, long)]
    pub genres: Option<String>,

    /// Short description or notes
    #[arg(short, long)]
    pub description: Option<String>,

    /// Release year
    #[arg(short, long)]
    pub year: Option<i32>,
}

/// Fields to change on an existing entry. Unset flags leave fields alone.
#[derive(Args, Clone)]
pub(crate) struct EditArgs {
    /// Movie id
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New poster URL
    #[arg(long, conflicts_with = "clear_poster")]
    pub poster: Option<String>,

    /// Remove the poster URL
    #[arg(long)]
    pub clear_poster: bool,

    /// New rating from 0 to 10
    #[arg(short, long, conflicts_with = "clear_rating")]
    pub rating: Option<f64>,

    /// Remove the rating
    #[arg(long)]
    pub clear_rating: bool,

    /// Date watched (YYYY-MM-DD or "today")
    #[arg(short, long, value_parser = parse_watched_date, conflicts_with = "unwatch")]
    pub watched: Option<NaiveDate>,

    /// Move the movie back to the wishlist
    #[arg(long)]
    pub unwatch: bool,

    /// Replace genres with this comma-separated list ("" clears them)
    #[arg(short, long)]
    pub genres: Option<String>,

    /// New description
    #[arg(short, long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// New release year
    #[arg(short, long, conflicts_with = "clear_year")]
    pub year: Option<i32>,

    /// Remove the release year
    #[arg(long)]
    pub clear_year: bool,
}

/// Filters and ordering for `query`.
#[derive(Args, Clone)]
pub(crate) struct QueryArgs {
    /// Title substring (case-insensitive)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Genre tag (case-insensitive exact match)
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Minimum rating; unrated movies are excluded
    #[arg(short, long)]
    pub min_rating: Option<f64>,

    /// Only movies that have been watched
    #[arg(short, long, conflicts_with = "status")]
    pub watched: bool,

    /// Only movies with this diary status (watched, wishlist)
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<DiaryStatus>,

    /// Watched on or after this date (YYYY-MM-DD or "today")
    #[arg(long = "from", value_parser = parse_watched_date)]
    pub watched_from: Option<NaiveDate>,

    /// Watched on or before this date (YYYY-MM-DD or "today")
    #[arg(long = "to", value_parser = parse_watched_date)]
    pub watched_to: Option<NaiveDate>,

    /// Sort key (title, rating, watched_date)
    #[arg(long)]
    pub sort: Option<SortBy>,

    /// Reverse the sort order
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add a movie to the diary
    Add(AddArgs),

    /// Show one movie in detail
    Show {
        /// Movie id
        id: i64,

        /// Also fetch the poster and report its size
        #[arg(long)]
        poster: bool,
    },

    /// Edit fields of a movie
    Edit(EditArgs),

    /// Delete a movie from the diary
    Delete {
        /// Movie id
        id: i64,
    },

    /// List every movie in the diary
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter and sort the diary
    Query(QueryArgs),

    /// Search titles, genres and descriptions
    Search {
        /// Text to search for
        text: String,
    },

    /// Rank movies by preferred genres (personal feed)
    Feed {
        /// Preferred genres in priority order (e.g., "Sci-Fi,Drama")
        genres: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check which posters load and which fall back to the placeholder
    Posters {
        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Import sample movies from a YAML file or directory
    Seed {
        /// YAML file or directory (default: catalog/movies.yaml)
        path: Option<PathBuf>,
    },

    /// Show diary statistics
    Stats,

    /// Delete the diary database
    Reset {
        /// Actually delete (otherwise only shows what would happen)
        #[arg(long)]
        confirm: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show current settings and the resolved database path
    Show,

    /// Set the default database path
    SetDb {
        /// Database path to save
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        path: Option<PathBuf>,

        /// Remove the saved path and fall back to the default location
        #[arg(long)]
        clear: bool,
    },
}

/// Parse `YYYY-MM-DD` or `today`.
pub(crate) fn parse_watched_date(s: &str) -> Result<NaiveDate, String> {
    if s.trim().eq_ignore_ascii_case("today") {
        return Ok(chrono::Local::now().date_naive());
    }
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

fn parse_status(s: &str) -> Result<DiaryStatus, String> {
    DiaryStatus::from_str_loose(s)
        .ok_or_else(|| format!("unknown status '{s}' (expected watched or wishlist)"))
}
