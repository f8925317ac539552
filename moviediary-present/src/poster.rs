use std::future::Future;
use std::io::Cursor;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use image::{ImageFormat, ImageReader};

use crate::error::LoadError;
use crate::view_model::{MovieCard, PosterSource, is_fetchable};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Posters fetched at once by [`resolve_posters`].
pub const MAX_CONCURRENT_LOADS: usize = 8;
const USER_AGENT: &str = concat!("moviediary/", env!("CARGO_PKG_VERSION"));

/// A fetched poster whose bytes are known to be a readable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl PosterImage {
    /// Sniff the image format from the bytes and read the dimensions from
    /// the header. The pixel data is not decoded.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        let reader = ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format()?;
        let format = reader.format().ok_or(LoadError::UnknownFormat)?;
        let (width, height) = reader.into_dimensions()?;
        Ok(Self {
            bytes,
            format,
            width,
            height,
        })
    }
}

/// Fetches poster artwork for a URL.
///
/// Implementations own their own caching and retry policy.
pub trait PosterLoader {
    fn load(&self, url: &str) -> impl Future<Output = Result<PosterImage, LoadError>> + Send;
}

/// What a list item should show in its poster slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterDisplay {
    Image(PosterImage),
    Placeholder,
}

impl PosterDisplay {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Resolve the poster for one card. Never fails: a missing URL or any load
/// error yields [`PosterDisplay::Placeholder`].
pub async fn resolve_poster<L: PosterLoader>(loader: &L, card: &MovieCard) -> PosterDisplay {
    let PosterSource::Remote(url) = &card.poster else {
        return PosterDisplay::Placeholder;
    };
    match loader.load(url).await {
        Ok(image) => {
            log::debug!(
                "Loaded poster for '{}' ({}x{} {:?})",
                card.title,
                image.width,
                image.height,
                image.format
            );
            PosterDisplay::Image(image)
        }
        Err(e) => {
            log::warn!("Poster for '{}' unavailable, using placeholder: {}", card.title, e);
            PosterDisplay::Placeholder
        }
    }
}

/// Resolve posters for a whole list, at most [`MAX_CONCURRENT_LOADS`] at a
/// time. Results come back in card order.
pub async fn resolve_posters<L: PosterLoader>(loader: &L, cards: &[MovieCard]) -> Vec<PosterDisplay> {
    stream::iter(cards)
        .map(|card| resolve_poster(loader, card))
        .buffered(MAX_CONCURRENT_LOADS)
        .collect()
        .await
}

// ── HTTP loader ─────────────────────────────────────────────────────────────

/// Poster loader backed by an async reqwest client.
#[derive(Debug, Clone)]
pub struct HttpPosterLoader {
    http: reqwest::Client,
}

impl HttpPosterLoader {
    pub fn new() -> Result<Self, LoadError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an already configured client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl PosterLoader for HttpPosterLoader {
    async fn load(&self, url: &str) -> Result<PosterImage, LoadError> {
        if !is_fetchable(url) {
            return Err(LoadError::InvalidUrl(url.to_string()));
        }

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        PosterImage::from_bytes(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "tests/poster_tests.rs"]
mod tests;
