//! Read queries for the catalog database.
//!
//! Provides snapshot listing, filtered queries, search, and statistics.
//! Filtering and ordering are delegated to the catalog query engine so the
//! in-memory and persisted paths share one set of semantics.

use std::collections::{BTreeSet, HashMap};

use moviediary_catalog::types::*;
use moviediary_catalog::{MovieQuery, rank_by_preferences, search};
use rusqlite::Connection;

use crate::operations::{MOVIE_COLUMNS, StoreError, row_to_movie};

// ── Listing ─────────────────────────────────────────────────────────────────

/// Every movie with its genre tags, ordered by id.
pub fn list_movies(conn: &Connection) -> Result<Vec<MovieEntry>, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id"))?;
    let rows = stmt.query_map([], row_to_movie)?;
    let mut movies = rows.collect::<Result<Vec<_>, _>>()?;

    let mut genres = all_genres(conn)?;
    for movie in &mut movies {
        if let Some(tags) = genres.remove(&movie.id.0) {
            movie.genre_tags = tags;
        }
    }
    Ok(movies)
}

/// Filter and order the catalog.
pub fn query_movies(conn: &Connection, query: &MovieQuery) -> Result<Vec<MovieEntry>, StoreError> {
    Ok(query.apply(list_movies(conn)?))
}

/// Free-text search across title, genres, and description.
pub fn search_movies(conn: &Connection, text: &str) -> Result<Vec<MovieEntry>, StoreError> {
    Ok(search(list_movies(conn)?, text))
}

/// The whole catalog ordered by genre preference.
pub fn movies_by_preference(
    conn: &Connection,
    preferred_genres: &[String],
) -> Result<Vec<MovieEntry>, StoreError> {
    Ok(rank_by_preferences(list_movies(conn)?, preferred_genres))
}

fn all_genres(conn: &Connection) -> Result<HashMap<i64, BTreeSet<String>>, StoreError> {
    let mut stmt = conn.prepare("SELECT movie_id, genre FROM movie_genres")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;

    let mut map: HashMap<i64, BTreeSet<String>> = HashMap::new();
    for row in rows {
        let (id, genre) = row?;
        map.entry(id).or_default().insert(genre);
    }
    Ok(map)
}

// ── Genres ──────────────────────────────────────────────────────────────────

/// Number of movies carrying each genre, most common first.
pub fn genre_counts(conn: &Connection) -> Result<Vec<GenreCount>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT genre, COUNT(*) AS n FROM movie_genres
         GROUP BY genre COLLATE NOCASE
         ORDER BY n DESC, genre COLLATE NOCASE",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(GenreCount {
            genre: row.get(0)?,
            movies: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub movies: i64,
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, StoreError> {
    let movies: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |r| r.get(0))?;
    let watched: i64 = conn.query_row(
        "SELECT COUNT(*) FROM movies WHERE watched_date IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let rated: i64 = conn.query_row(
        "SELECT COUNT(*) FROM movies WHERE rating IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let average_rating: Option<f64> =
        conn.query_row("SELECT AVG(rating) FROM movies", [], |r| r.get(0))?;
    let genres: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT lower(genre)) FROM movie_genres",
        [],
        |r| r.get(0),
    )?;

    Ok(CatalogStats {
        movies,
        watched,
        wishlist: movies - watched,
        rated,
        average_rating,
        genres,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub movies: i64,
    pub watched: i64,
    pub wishlist: i64,
    pub rated: i64,
    /// Mean over rated movies only; `None` when nothing is rated.
    pub average_rating: Option<f64>,
    pub genres: i64,
}
