//! Owned catalog handle with change notifications.
//!
//! [`CatalogStore`] wraps a connection and the free functions in
//! [`crate::operations`] and [`crate::queries`]. Writes take `&mut self`,
//! so a single owner serializes every mutation. Each successful mutation
//! bumps [`CatalogStore::revision`] and is broadcast to subscribers so
//! list views know to re-query.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use moviediary_catalog::types::*;
use moviediary_catalog::MovieQuery;
use rusqlite::Connection;

use crate::operations::{self, SeedStats, StoreError};
use crate::queries::{self, CatalogStats, GenreCount};
use crate::schema;

/// A committed change to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogChange {
    Added(MovieId),
    Updated(MovieId),
    Deleted(MovieId),
    Seeded { added: usize },
}

impl CatalogChange {
    pub fn movie_id(&self) -> Option<MovieId> {
        match self {
            Self::Added(id) | Self::Updated(id) | Self::Deleted(id) => Some(*id),
            Self::Seeded { .. } => None,
        }
    }
}

/// A point-in-time snapshot of the catalog, consumed lazily.
///
/// Later writes to the store do not affect a snapshot already taken.
#[derive(Debug)]
pub struct MovieList {
    entries: std::vec::IntoIter<MovieEntry>,
}

impl Iterator for MovieList {
    type Item = MovieEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for MovieList {}

pub struct CatalogStore {
    conn: Connection,
    revision: u64,
    subscribers: Vec<Sender<CatalogChange>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl CatalogStore {
    /// Open (creating or migrating as needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self::from_connection(schema::open_database(path)?))
    }

    /// In-memory store with the full schema.
    pub fn open_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(schema::open_memory()?))
    }

    /// Wrap a connection whose schema is already in place.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            revision: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Number of mutations committed through this handle.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receive every change committed after this call.
    pub fn subscribe(&mut self) -> Receiver<CatalogChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    pub fn add(&mut self, movie: &NewMovie) -> Result<MovieId, StoreError> {
        let id = operations::add_movie(&self.conn, movie)?;
        self.notify(CatalogChange::Added(id));
        Ok(id)
    }

    /// Apply a partial update. An empty update only checks the id exists.
    pub fn update(&mut self, id: MovieId, update: &MovieUpdate) -> Result<MovieEntry, StoreError> {
        if update.is_empty() {
            return self.get(id);
        }
        let entry = operations::update_movie(&self.conn, id, update)?;
        self.notify(CatalogChange::Updated(id));
        Ok(entry)
    }

    pub fn delete(&mut self, id: MovieId) -> Result<(), StoreError> {
        operations::delete_movie(&self.conn, id)?;
        self.notify(CatalogChange::Deleted(id));
        Ok(())
    }

    pub fn seed(&mut self, movies: &[NewMovie]) -> Result<SeedStats, StoreError> {
        let stats = operations::seed_movies(&self.conn, movies)?;
        if stats.added > 0 {
            self.notify(CatalogChange::Seeded { added: stats.added });
        }
        Ok(stats)
    }

    pub fn seed_from_yaml(&mut self, path: &Path) -> Result<SeedStats, StoreError> {
        let movies = moviediary_catalog::load_seed(path)?;
        self.seed(&movies)
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    pub fn get(&self, id: MovieId) -> Result<MovieEntry, StoreError> {
        operations::get_movie(&self.conn, id)
    }

    /// Snapshot of every movie in id order. Each call is independent.
    pub fn list(&self) -> Result<MovieList, StoreError> {
        Ok(MovieList {
            entries: queries::list_movies(&self.conn)?.into_iter(),
        })
    }

    pub fn query(&self, query: &MovieQuery) -> Result<Vec<MovieEntry>, StoreError> {
        queries::query_movies(&self.conn, query)
    }

    pub fn search(&self, text: &str) -> Result<Vec<MovieEntry>, StoreError> {
        queries::search_movies(&self.conn, text)
    }

    pub fn by_preference(&self, preferred_genres: &[String]) -> Result<Vec<MovieEntry>, StoreError> {
        queries::movies_by_preference(&self.conn, preferred_genres)
    }

    pub fn stats(&self) -> Result<CatalogStats, StoreError> {
        queries::catalog_stats(&self.conn)
    }

    pub fn genre_counts(&self) -> Result<Vec<GenreCount>, StoreError> {
        queries::genre_counts(&self.conn)
    }

    fn notify(&mut self, change: CatalogChange) {
        self.revision += 1;
        // Dropped receivers are pruned here.
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }
}
