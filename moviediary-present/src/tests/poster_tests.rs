use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{ImageFormat, Rgba, RgbaImage};
use moviediary_catalog::types::{MovieId, NewMovie};

use super::*;
use crate::view_model::to_view_model;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Serves canned responses keyed by URL and counts calls.
struct FakeLoader {
    posters: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl FakeLoader {
    fn new() -> Self {
        Self {
            posters: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn with(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.posters.insert(url.to_string(), bytes);
        self
    }
}

impl PosterLoader for FakeLoader {
    async fn load(&self, url: &str) -> Result<PosterImage, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.posters.get(url) {
            Some(bytes) => PosterImage::from_bytes(bytes.clone()),
            None => Err(LoadError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

fn card(title: &str, poster: Option<&str>) -> MovieCard {
    let mut movie = NewMovie::new(title);
    if let Some(url) = poster {
        movie = movie.poster_url(url);
    }
    to_view_model(&movie.into_entry(MovieId(1)).unwrap())
}

#[test]
fn test_from_bytes_sniffs_png() {
    let image = PosterImage::from_bytes(png_bytes(4, 6)).unwrap();
    assert_eq!(image.format, ImageFormat::Png);
    assert_eq!((image.width, image.height), (4, 6));
}

#[test]
fn test_from_bytes_rejects_garbage() {
    let err = PosterImage::from_bytes(b"<html>not an image</html>".to_vec()).unwrap_err();
    assert!(matches!(err, LoadError::UnknownFormat));
}

#[tokio::test]
async fn test_resolve_loads_remote_poster() {
    let url = "https://example.com/inception.png";
    let loader = FakeLoader::new().with(url, png_bytes(2, 3));

    let display = resolve_poster(&loader, &card("Inception", Some(url))).await;
    match display {
        PosterDisplay::Image(image) => assert_eq!((image.width, image.height), (2, 3)),
        PosterDisplay::Placeholder => panic!("expected an image"),
    }
}

#[tokio::test]
async fn test_resolve_without_url_skips_loader() {
    let loader = FakeLoader::new();
    let display = resolve_poster(&loader, &card("Heat", None)).await;
    assert!(display.is_placeholder());
    assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_resolve_degrades_on_load_error() {
    let loader = FakeLoader::new();
    let display = resolve_poster(&loader, &card("Heat", Some("https://example.com/gone.jpg"))).await;
    assert!(display.is_placeholder());
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_resolve_degrades_on_undecodable_bytes() {
    let url = "https://example.com/broken.jpg";
    let loader = FakeLoader::new().with(url, vec![0u8; 16]);
    assert!(resolve_poster(&loader, &card("Heat", Some(url))).await.is_placeholder());
}

#[tokio::test]
async fn test_resolve_posters_keeps_card_order() {
    let good = "https://example.com/good.png";
    let loader = FakeLoader::new().with(good, png_bytes(1, 1));
    let cards = vec![
        card("Missing", Some("https://example.com/missing.png")),
        card("Good", Some(good)),
        card("None", None),
    ];

    let displays = resolve_posters(&loader, &cards).await;
    assert_eq!(displays.len(), 3);
    assert!(displays[0].is_placeholder());
    assert!(matches!(displays[1], PosterDisplay::Image(_)));
    assert!(displays[2].is_placeholder());
    assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_http_loader_rejects_invalid_urls_without_request() {
    let loader = HttpPosterLoader::new().unwrap();
    for url in ["", "poster.jpg", "ftp://example.com/poster.jpg"] {
        let err = loader.load(url).await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidUrl(ref u) if u == url));
    }
}
