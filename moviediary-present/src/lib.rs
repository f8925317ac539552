//! Presentation adapter for the movie diary.
//!
//! Catalog entries become [`MovieCard`]s for list rendering. Poster artwork
//! is fetched through a [`PosterLoader`]; any failure falls back to the
//! placeholder.

pub mod error;
pub mod poster;
pub mod view_model;

pub use error::LoadError;
pub use poster::{
    HttpPosterLoader, PosterDisplay, PosterImage, PosterLoader, resolve_poster, resolve_posters,
};
pub use view_model::{MAX_STARS, MovieCard, PosterSource, to_view_model, to_view_models};
