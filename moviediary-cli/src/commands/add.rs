use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use moviediary_catalog::types::{NewMovie, parse_genre_tags};

use crate::CliError;
use crate::cli_types::AddArgs;

pub(crate) fn run_add(db_path: &Path, args: AddArgs) -> Result<(), CliError> {
    let movie = new_movie_from_args(args);
    let mut store = super::open_store(db_path)?;
    let id = store.add(&movie)?;

    log::info!(
        "Added {} as {}",
        movie.title.trim().if_supports_color(Stdout, |t| t.bold()),
        format!("#{id}").if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

fn new_movie_from_args(args: AddArgs) -> NewMovie {
    let mut movie = NewMovie::new(args.title);
    if let Some(url) = args.poster {
        movie = movie.poster_url(url);
    }
    if let Some(rating) = args.rating {
        movie = movie.rating(rating);
    }
    if let Some(date) = args.watched {
        movie = movie.watched_on(date);
    }
    if let Some(genres) = args.genres {
        movie.genre_tags = parse_genre_tags(&genres);
    }
    if let Some(description) = args.description {
        movie = movie.description(description);
    }
    if let Some(year) = args.year {
        movie = movie.release_year(year);
    }
    movie
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args(title: &str) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            poster: None,
            rating: None,
            watched: None,
            genres: None,
            description: None,
            year: None,
        }
    }

    #[test]
    fn test_title_only_is_wishlist_entry() {
        let movie = new_movie_from_args(args("Heat"));
        assert_eq!(movie.title, "Heat");
        assert_eq!(movie.rating, None);
        assert_eq!(movie.watched_date, None);
        assert!(movie.genre_tags.is_empty());
    }

    #[test]
    fn test_all_fields_are_carried() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let movie = new_movie_from_args(AddArgs {
            poster: Some("https://example.com/p.jpg".to_string()),
            rating: Some(9.0),
            watched: Some(date),
            genres: Some("Sci-Fi, Action, Sci-Fi".to_string()),
            description: Some("Dreams within dreams".to_string()),
            year: Some(2010),
            ..args("Inception")
        });
        assert_eq!(movie.poster_url.as_deref(), Some("https://example.com/p.jpg"));
        assert_eq!(movie.rating, Some(9.0));
        assert_eq!(movie.watched_date, Some(date));
        assert_eq!(movie.genre_tags.len(), 2);
        assert_eq!(movie.release_year, Some(2010));
    }
}
