//! Movie catalog data model, validation, query engine, and YAML seed loading.
//!
//! This crate defines the catalog domain without any database dependencies.
//! Consumers can use these types directly for serialization, display, or
//! passing to `moviediary-db` for persistence.

pub mod query;
pub mod types;
pub mod validate;
pub mod yaml;

pub use query::{MovieQuery, SortBy, parse_preference_list, rank_by_preferences, search};
pub use types::*;
pub use validate::ValidationError;
pub use yaml::{SeedError, load_seed, load_seed_dir, load_seed_file, parse_seed};
