//! Data model types for the movie catalog.
//!
//! These types represent the persistent catalog schema: movie entries, the
//! inputs used to create and edit them, and the derived diary status.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validate::{self, ValidationError};

// ── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned movie identifier. Never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ── Movie ───────────────────────────────────────────────────────────────────

/// A movie as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieEntry {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Score on a 0–10 scale. `None` means unrated.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Day the movie was watched. `None` means it is still on the wishlist.
    #[serde(default)]
    pub watched_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre_tags: BTreeSet<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
}

impl MovieEntry {
    pub fn status(&self) -> DiaryStatus {
        DiaryStatus::from_watched_date(self.watched_date)
    }

    pub fn is_watched(&self) -> bool {
        self.watched_date.is_some()
    }

    /// Case-insensitive check against the genre tags.
    pub fn has_genre(&self, genre: &str) -> bool {
        let needle = genre.trim().to_lowercase();
        self.genre_tags.iter().any(|g| g.to_lowercase() == needle)
    }

    /// Apply a partial update, producing the merged and validated entry.
    ///
    /// `self` is left untouched if the merged fields violate an invariant.
    pub fn merged_with(&self, update: &MovieUpdate) -> Result<MovieEntry, ValidationError> {
        let mut merged = self.clone();
        if let Some(title) = &update.title {
            merged.title = title.clone();
        }
        if let Some(poster_url) = &update.poster_url {
            merged.poster_url = poster_url.clone();
        }
        if let Some(rating) = update.rating {
            merged.rating = rating;
        }
        if let Some(watched_date) = update.watched_date {
            merged.watched_date = watched_date;
        }
        if let Some(tags) = &update.genre_tags {
            merged.genre_tags = tags.clone();
        }
        if let Some(description) = &update.description {
            merged.description = description.clone();
        }
        if let Some(year) = update.release_year {
            merged.release_year = year;
        }

        merged.title = validate::title(&merged.title)?;
        merged.poster_url = normalize_optional_text(merged.poster_url);
        merged.description = normalize_optional_text(merged.description);
        validate::rating(merged.rating)?;
        validate::release_year(merged.release_year)?;
        merged.genre_tags = normalize_tags(merged.genre_tags);
        Ok(merged)
    }
}

/// Input for adding a movie. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub watched_date: Option<NaiveDate>,
    /// Accepts either a YAML list or the comma-separated form used by
    /// older exports (`"Crime, Drama"`).
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub genre_tags: BTreeSet<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
}

impl NewMovie {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn poster_url(mut self, url: impl Into<String>) -> Self {
        self.poster_url = Some(url.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn watched_on(mut self, date: NaiveDate) -> Self {
        self.watched_date = Some(date);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre_tags.insert(genre.into());
        self
    }

    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genre_tags.extend(genres.into_iter().map(Into::into));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    /// Validate and normalize into the entry that will be persisted under `id`.
    pub fn into_entry(self, id: MovieId) -> Result<MovieEntry, ValidationError> {
        let title = validate::title(&self.title)?;
        validate::rating(self.rating)?;
        validate::release_year(self.release_year)?;
        Ok(MovieEntry {
            id,
            title,
            poster_url: normalize_optional_text(self.poster_url),
            rating: self.rating,
            watched_date: self.watched_date,
            genre_tags: normalize_tags(self.genre_tags),
            description: normalize_optional_text(self.description),
            release_year: self.release_year,
        })
    }
}

/// Partial update for an existing movie.
///
/// `None` leaves a field as it is. For nullable fields the inner option
/// distinguishes "set to this value" from "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub poster_url: Option<Option<String>>,
    pub rating: Option<Option<f64>>,
    pub watched_date: Option<Option<NaiveDate>>,
    pub genre_tags: Option<BTreeSet<String>>,
    pub description: Option<Option<String>>,
    pub release_year: Option<Option<i32>>,
}

impl MovieUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Diary Status ────────────────────────────────────────────────────────────

/// Where a movie sits in the diary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaryStatus {
    Wishlist,
    Watched,
}

impl DiaryStatus {
    pub fn from_watched_date(date: Option<NaiveDate>) -> Self {
        if date.is_some() {
            Self::Watched
        } else {
            Self::Wishlist
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Watched => "watched",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wishlist" | "watchlist" | "want" => Some(Self::Wishlist),
            "watched" | "seen" => Some(Self::Watched),
            _ => None,
        }
    }
}

impl fmt::Display for DiaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Genre Tags ──────────────────────────────────────────────────────────────

/// Parse a comma-separated genre list (`"Sci-Fi, Action"`) into a tag set.
pub fn parse_genre_tags(csv: &str) -> BTreeSet<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim labels and drop empties. Labels differing only in case collapse
/// to the first one in sort order.
fn normalize_tags(tags: BTreeSet<String>) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut out = BTreeSet::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.to_lowercase()) {
            out.insert(tag.to_string());
        }
    }
    out
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Tags::deserialize(deserializer)? {
        Tags::List(list) => list.into_iter().collect(),
        Tags::Csv(csv) => parse_genre_tags(&csv),
    })
}
