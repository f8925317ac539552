//! SQLite persistence layer for the movie catalog.
//!
//! Provides schema creation, CRUD operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature), plus the
//! [`CatalogStore`] handle that owns a connection and broadcasts changes.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{
    add_movie, delete_movie, find_movie_by_title, get_movie, seed_from_yaml, seed_movies,
    update_movie, SeedStats, StoreError,
};
pub use queries::{
    catalog_stats, genre_counts, list_movies, movies_by_preference, query_movies, search_movies,
    CatalogStats, GenreCount,
};
pub use schema::{open_database, open_memory, SchemaError};
pub use store::{CatalogChange, CatalogStore, MovieList};
