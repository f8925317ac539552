//! List-item projections of catalog entries.

use moviediary_catalog::types::{DiaryStatus, MovieEntry, MovieId};
use reqwest::Url;

/// Number of stars on a full rating bar.
pub const MAX_STARS: u8 = 5;

/// Where a card's poster comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PosterSource {
    /// Fetch from this URL through the poster loader.
    Remote(String),
    /// Show the bundled placeholder artwork.
    Placeholder,
}

impl PosterSource {
    /// Anything other than an absolute http(s) URL maps to the placeholder.
    pub fn from_url(url: Option<&str>) -> Self {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(u) if is_fetchable(u) => Self::Remote(u.to_string()),
            _ => Self::Placeholder,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Remote(url) => Some(url),
            Self::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

pub(crate) fn is_fetchable(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Display-ready projection of a [`MovieEntry`].
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub poster: PosterSource,
    /// `"8.5/10"`, or `"Not rated"`.
    pub rating_label: String,
    /// Rating mapped onto a five-star bar, rounded to the nearest star.
    pub star_count: u8,
    pub watched: bool,
    pub status: DiaryStatus,
    /// `"Watched 2024-01-20"`, or `None` while on the wishlist.
    pub watched_label: Option<String>,
    /// Genre tags joined with `", "`.
    pub genres_label: String,
    pub year_label: Option<String>,
    pub description: Option<String>,
}

/// Map an entry to its card. Pure and infallible.
pub fn to_view_model(entry: &MovieEntry) -> MovieCard {
    MovieCard {
        id: entry.id,
        title: entry.title.clone(),
        poster: PosterSource::from_url(entry.poster_url.as_deref()),
        rating_label: rating_label(entry.rating),
        star_count: star_count(entry.rating),
        watched: entry.is_watched(),
        status: entry.status(),
        watched_label: entry.watched_date.map(|d| format!("Watched {}", d.format("%Y-%m-%d"))),
        genres_label: entry
            .genre_tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        year_label: entry.release_year.map(|y| y.to_string()),
        description: entry.description.clone(),
    }
}

/// Map a sequence of entries, preserving order.
pub fn to_view_models<'a, I>(entries: I) -> Vec<MovieCard>
where
    I: IntoIterator<Item = &'a MovieEntry>,
{
    entries.into_iter().map(to_view_model).collect()
}

fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.fract() == 0.0 => format!("{}/10", r as i64),
        Some(r) => format!("{r}/10"),
        None => "Not rated".to_string(),
    }
}

fn star_count(rating: Option<f64>) -> u8 {
    match rating {
        Some(r) if r.is_finite() => ((r / 2.0).round().clamp(0.0, MAX_STARS as f64)) as u8,
        _ => 0,
    }
}

#[cfg(test)]
#[path = "tests/view_model_tests.rs"]
mod tests;
