use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use moviediary_catalog::types::MovieId;
use moviediary_present::{
    HttpPosterLoader, MovieCard, PosterDisplay, PosterSource, resolve_poster, to_view_model,
};

use crate::CliError;

pub(crate) fn run_show(db_path: &Path, id: i64, fetch_poster: bool) -> Result<(), CliError> {
    let store = super::open_store(db_path)?;
    let entry = store.get(MovieId(id))?;
    let card = to_view_model(&entry);

    log::info!(
        "{}",
        card.title.if_supports_color(Stdout, |t| t.bold()),
    );
    let field = |name: &str, value: &str| {
        log::info!(
            "  {:<12} {}",
            format!("{name}:").if_supports_color(Stdout, |t| t.cyan()),
            value,
        );
    };

    field("Id", &card.id.to_string());
    if let Some(year) = &card.year_label {
        field("Released", year);
    }
    field(
        "Rating",
        &format!("{} {}", super::star_bar(card.star_count), card.rating_label),
    );
    field("Status", card.status.as_str());
    if let Some(watched) = &card.watched_label {
        field("Watched", watched);
    }
    if !card.genres_label.is_empty() {
        field("Genres", &card.genres_label);
    }
    match &card.poster {
        PosterSource::Remote(url) => field("Poster", url),
        PosterSource::Placeholder => field("Poster", "(placeholder)"),
    }
    if let Some(description) = &card.description {
        crate::log_blank();
        log::info!("  {}", description);
    }

    if fetch_poster {
        crate::log_blank();
        report_poster(&card)?;
    }
    Ok(())
}

fn report_poster(card: &MovieCard) -> Result<(), CliError> {
    let loader = HttpPosterLoader::new()
        .map_err(|e| CliError::runtime(format!("Failed to create HTTP client: {e}")))?;
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;

    match rt.block_on(resolve_poster(&loader, card)) {
        PosterDisplay::Image(image) => log::info!(
            "  Poster loaded: {}x{} {:?} ({} bytes)",
            image.width,
            image.height,
            image.format,
            image.bytes.len(),
        ),
        PosterDisplay::Placeholder => log::info!(
            "  Poster: {}",
            "placeholder".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }
    Ok(())
}
