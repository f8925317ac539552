//! Filtering, sorting, and ranking over catalog snapshots.
//!
//! Everything here is pure: callers hand in the entries (usually a store
//! snapshot) and get back a new ordered `Vec`. Nothing is cached between
//! calls.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DiaryStatus, MovieEntry};

// ── Sort Keys ───────────────────────────────────────────────────────────────

/// Field a query result is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Title,
    Rating,
    WatchedDate,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Rating => "rating",
            Self::WatchedDate => "watched_date",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "title" => Ok(Self::Title),
            "rating" => Ok(Self::Rating),
            "watched_date" | "watched" | "date" => Ok(Self::WatchedDate),
            other => Err(format!(
                "unknown sort key '{other}' (expected title, rating or watched_date)"
            )),
        }
    }
}

// ── Query ───────────────────────────────────────────────────────────────────

/// Filter and ordering options. All set filters must match (AND semantics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieQuery {
    /// Case-insensitive substring of the title.
    #[serde(default)]
    pub title_contains: Option<String>,
    /// Case-insensitive exact match against any genre tag.
    #[serde(default)]
    pub genre: Option<String>,
    /// Inclusive lower bound. Unrated movies never pass this filter.
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// `Some(true)` keeps only watched movies; anything else is no filter.
    #[serde(default)]
    pub watched_only: Option<bool>,
    #[serde(default)]
    pub status: Option<DiaryStatus>,
    /// Inclusive lower bound on the watched date. Unwatched movies never pass.
    #[serde(default)]
    pub watched_from: Option<NaiveDate>,
    /// Inclusive upper bound on the watched date. Unwatched movies never pass.
    #[serde(default)]
    pub watched_to: Option<NaiveDate>,
    /// `None` keeps store order (id ascending).
    #[serde(default)]
    pub sort_by: Option<SortBy>,
    #[serde(default)]
    pub descending: bool,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl MovieQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_contains(mut self, text: impl Into<String>) -> Self {
        self.title_contains = Some(text.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn watched_only(mut self, watched_only: bool) -> Self {
        self.watched_only = Some(watched_only);
        self
    }

    pub fn status(mut self, status: DiaryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn watched_from(mut self, date: NaiveDate) -> Self {
        self.watched_from = Some(date);
        self
    }

    pub fn watched_to(mut self, date: NaiveDate) -> Self {
        self.watched_to = Some(date);
        self
    }

    /// Both ends inclusive.
    pub fn watched_between(self, from: NaiveDate, to: NaiveDate) -> Self {
        self.watched_from(from).watched_to(to)
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single entry passes every configured filter.
    pub fn matches(&self, entry: &MovieEntry) -> bool {
        if let Some(needle) = non_blank(self.title_contains.as_deref()) {
            if !entry.title.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(genre) = non_blank(self.genre.as_deref()) {
            if !entry.has_genre(genre) {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            match entry.rating {
                Some(r) if r >= min => {}
                _ => return false,
            }
        }
        if self.watched_only == Some(true) && !entry.is_watched() {
            return false;
        }
        if let Some(status) = self.status {
            if entry.status() != status {
                return false;
            }
        }
        if self.watched_from.is_some() || self.watched_to.is_some() {
            let Some(watched) = entry.watched_date else {
                return false;
            };
            if self.watched_from.is_some_and(|from| watched < from)
                || self.watched_to.is_some_and(|to| watched > to)
            {
                return false;
            }
        }
        true
    }

    /// Filter, order, and truncate `entries`. An empty result is not an error.
    pub fn apply<I>(&self, entries: I) -> Vec<MovieEntry>
    where
        I: IntoIterator<Item = MovieEntry>,
    {
        let mut out: Vec<MovieEntry> = entries.into_iter().filter(|e| self.matches(e)).collect();
        let descending = self.descending;
        match self.sort_by {
            None => out.sort_by_key(|e| e.id),
            Some(key) => out.sort_by(|a, b| compare_by(key, descending, a, b)),
        }
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

/// Order two entries by `key`. Entries missing the key sort last in either
/// direction; ties always fall back to id ascending.
fn compare_by(key: SortBy, descending: bool, a: &MovieEntry, b: &MovieEntry) -> Ordering {
    let primary = match key {
        SortBy::Title => directed(compare_titles(&a.title, &b.title), descending),
        SortBy::Rating => compare_optional(a.rating, b.rating, descending, |x, y| x.total_cmp(y)),
        SortBy::WatchedDate => {
            compare_optional(a.watched_date, b.watched_date, descending, |x, y| x.cmp(y))
        }
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

fn compare_optional<T>(
    a: Option<T>,
    b: Option<T>,
    descending: bool,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => directed(cmp(&x, &y), descending),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ── Free-text Search ────────────────────────────────────────────────────────

/// Case-insensitive search across title, genre tags, and description,
/// ordered by title. Blank text matches everything.
pub fn search<I>(entries: I, text: &str) -> Vec<MovieEntry>
where
    I: IntoIterator<Item = MovieEntry>,
{
    let needle = text.trim().to_lowercase();
    let mut out: Vec<MovieEntry> = entries
        .into_iter()
        .filter(|e| needle.is_empty() || search_matches(e, &needle))
        .collect();
    out.sort_by(|a, b| compare_titles(&a.title, &b.title).then_with(|| a.id.cmp(&b.id)));
    out
}

fn search_matches(entry: &MovieEntry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry
            .genre_tags
            .iter()
            .any(|g| g.to_lowercase().contains(needle))
        || entry
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

// ── Preference Ranking ──────────────────────────────────────────────────────

/// Parse an ordered, comma-separated preference list (`"Action,Drama"`).
/// Order is significant, so this keeps duplicates out but preserves position.
pub fn parse_preference_list(csv: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for genre in csv.split(',').map(str::trim).filter(|g| !g.is_empty()) {
        if !out.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
            out.push(genre.to_string());
        }
    }
    out
}

/// Order entries so movies carrying an earlier preferred genre come first.
///
/// Each entry ranks by the first preference (in list order) it carries;
/// entries with none of them go last. Within a rank, title then id.
/// An empty preference list degrades to plain title order.
pub fn rank_by_preferences<I>(entries: I, preferred_genres: &[String]) -> Vec<MovieEntry>
where
    I: IntoIterator<Item = MovieEntry>,
{
    let prefs: Vec<&str> = preferred_genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();

    let mut ranked: Vec<(usize, MovieEntry)> = entries
        .into_iter()
        .map(|e| {
            let rank = prefs
                .iter()
                .position(|p| e.has_genre(p))
                .unwrap_or(usize::MAX);
            (rank, e)
        })
        .collect();

    ranked.sort_by(|(ra, a), (rb, b)| {
        ra.cmp(rb)
            .then_with(|| compare_titles(&a.title, &b.title))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.into_iter().map(|(_, e)| e).collect()
}
