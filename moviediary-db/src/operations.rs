//! CRUD operations for catalog movies.

use std::collections::BTreeSet;
use std::path::Path;

use moviediary_catalog::types::*;
use moviediary_catalog::{SeedError, ValidationError};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Movie {id} not found")]
    NotFound { id: MovieId },
    #[error("Invalid movie: {0}")]
    Validation(#[from] ValidationError),
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub(crate) const MOVIE_COLUMNS: &str =
    "id, title, poster_url, rating, watched_date, description, release_year";

// ── Movie Operations ────────────────────────────────────────────────────────

/// Validate and insert a movie. Returns the assigned id.
///
/// Nothing is written if validation fails.
pub fn add_movie(conn: &Connection, movie: &NewMovie) -> Result<MovieId, StoreError> {
    // The id is a placeholder until SQLite assigns one.
    let entry = movie.clone().into_entry(MovieId(0))?;

    let tx = conn.unchecked_transaction()?;
    let id = insert_movie(&tx, &entry)?;
    tx.commit()?;

    log::debug!("Added movie {} '{}'", id, entry.title);
    Ok(id)
}

/// Fetch a movie with its genre tags.
pub fn get_movie(conn: &Connection, id: MovieId) -> Result<MovieEntry, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?1"))?;
    let mut entry = stmt
        .query_row(params![id.0], row_to_movie)
        .optional()?
        .ok_or(StoreError::NotFound { id })?;
    entry.genre_tags = load_genres(conn, id)?;
    Ok(entry)
}

/// Apply a partial update. The id never changes.
///
/// The merged entry is validated before anything is written, so a failed
/// update leaves the stored row untouched.
pub fn update_movie(
    conn: &Connection,
    id: MovieId,
    update: &MovieUpdate,
) -> Result<MovieEntry, StoreError> {
    let current = get_movie(conn, id)?;
    let merged = current.merged_with(update)?;

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "UPDATE movies SET
             title = ?2,
             poster_url = ?3,
             rating = ?4,
             watched_date = ?5,
             description = ?6,
             release_year = ?7,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id.0,
            merged.title,
            merged.poster_url,
            merged.rating,
            merged.watched_date,
            merged.description,
            merged.release_year,
        ],
    )?;
    if update.genre_tags.is_some() {
        tx.execute("DELETE FROM movie_genres WHERE movie_id = ?1", params![id.0])?;
        insert_genres(&tx, id, &merged.genre_tags)?;
    }
    tx.commit()?;

    log::debug!("Updated movie {}", id);
    Ok(merged)
}

/// Delete a movie and its genre tags.
pub fn delete_movie(conn: &Connection, id: MovieId) -> Result<(), StoreError> {
    let changed = conn.execute("DELETE FROM movies WHERE id = ?1", params![id.0])?;
    if changed == 0 {
        return Err(StoreError::NotFound { id });
    }
    log::debug!("Deleted movie {}", id);
    Ok(())
}

/// Find a movie by title (case-insensitive) and release year.
///
/// This is the natural key used to keep seeding idempotent.
pub fn find_movie_by_title(
    conn: &Connection,
    title: &str,
    release_year: Option<i32>,
) -> Result<Option<MovieId>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id FROM movies
         WHERE title = ?1 COLLATE NOCASE AND release_year IS ?2
         ORDER BY id LIMIT 1",
    )?;
    let id = stmt
        .query_row(params![title.trim(), release_year], |row| row.get::<_, i64>(0))
        .optional()?;
    Ok(id.map(MovieId))
}

// ── Seed Loading ────────────────────────────────────────────────────────────

/// Statistics from seeding the database.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    pub added: usize,
    pub skipped: usize,
}

/// Insert seed movies that are not already present.
///
/// Every record is validated first; one bad record rejects the whole batch.
/// Safe to call repeatedly.
pub fn seed_movies(conn: &Connection, movies: &[NewMovie]) -> Result<SeedStats, StoreError> {
    let entries = movies
        .iter()
        .cloned()
        .map(|m| m.into_entry(MovieId(0)))
        .collect::<Result<Vec<_>, _>>()?;

    let tx = conn.unchecked_transaction()?;
    let mut stats = SeedStats::default();
    for entry in &entries {
        if find_movie_by_title(&tx, &entry.title, entry.release_year)?.is_some() {
            stats.skipped += 1;
            continue;
        }
        insert_movie(&tx, entry)?;
        stats.added += 1;
    }
    tx.commit()?;

    log::debug!("Seeded {} movies ({} already present)", stats.added, stats.skipped);
    Ok(stats)
}

/// Load seed YAML (a file or a directory of files) into the database.
pub fn seed_from_yaml(conn: &Connection, path: &Path) -> Result<SeedStats, StoreError> {
    let movies = moviediary_catalog::load_seed(path)?;
    seed_movies(conn, &movies)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Insert an already-validated entry. Callers own the transaction.
fn insert_movie(conn: &Connection, entry: &MovieEntry) -> Result<MovieId, StoreError> {
    conn.execute(
        "INSERT INTO movies (title, poster_url, rating, watched_date, description, release_year)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.title,
            entry.poster_url,
            entry.rating,
            entry.watched_date,
            entry.description,
            entry.release_year,
        ],
    )?;
    let id = MovieId(conn.last_insert_rowid());
    insert_genres(conn, id, &entry.genre_tags)?;
    Ok(id)
}

fn insert_genres(
    conn: &Connection,
    id: MovieId,
    tags: &BTreeSet<String>,
) -> Result<(), StoreError> {
    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO movie_genres (movie_id, genre) VALUES (?1, ?2)")?;
    for tag in tags {
        stmt.execute(params![id.0, tag])?;
    }
    Ok(())
}

pub(crate) fn load_genres(conn: &Connection, id: MovieId) -> Result<BTreeSet<String>, StoreError> {
    let mut stmt = conn.prepare("SELECT genre FROM movie_genres WHERE movie_id = ?1")?;
    let rows = stmt.query_map(params![id.0], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<BTreeSet<_>, _>>().map_err(Into::into)
}

/// Map a row selected with [`MOVIE_COLUMNS`]. Genre tags are left empty.
pub(crate) fn row_to_movie(row: &rusqlite::Row<'_>) -> rusqlite::Result<MovieEntry> {
    Ok(MovieEntry {
        id: MovieId(row.get(0)?),
        title: row.get(1)?,
        poster_url: row.get(2)?,
        rating: row.get(3)?,
        watched_date: row.get(4)?,
        genre_tags: BTreeSet::new(),
        description: row.get(5)?,
        release_year: row.get(6)?,
    })
}
