/// Errors surfaced by a poster loader.
///
/// The presentation layer never propagates these to the list view; it
/// falls back to the placeholder poster instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid poster URL: {0}")]
    InvalidUrl(String),

    #[error("Unrecognized image format")]
    UnknownFormat,

    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
