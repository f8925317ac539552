use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use moviediary_catalog::types::{MovieId, MovieUpdate, parse_genre_tags};
use moviediary_present::to_view_model;

use crate::CliError;
use crate::cli_types::EditArgs;

pub(crate) fn run_edit(db_path: &Path, args: EditArgs) -> Result<(), CliError> {
    let id = MovieId(args.id);
    let update = update_from_args(args);
    let mut store = super::open_store(db_path)?;

    if update.is_empty() {
        // Still reports NotFound for unknown ids.
        store.get(id)?;
        log::warn!("Nothing to change for #{id}");
        return Ok(());
    }

    let entry = store.update(id, &update)?;
    log::info!(
        "{}",
        format!("Updated #{id}").if_supports_color(Stdout, |t| t.bold()),
    );
    super::print_card(&to_view_model(&entry));
    Ok(())
}

fn update_from_args(args: EditArgs) -> MovieUpdate {
    MovieUpdate {
        title: args.title,
        poster_url: clearable(args.poster, args.clear_poster),
        rating: clearable(args.rating, args.clear_rating),
        watched_date: clearable(args.watched, args.unwatch),
        genre_tags: args.genres.as_deref().map(parse_genre_tags),
        description: clearable(args.description, args.clear_description),
        release_year: clearable(args.year, args.clear_year),
    }
}

/// `--x value` sets, `--clear-x` clears, neither leaves the field alone.
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    match (value, clear) {
        (Some(v), _) => Some(Some(v)),
        (None, true) => Some(None),
        (None, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EditArgs {
        EditArgs {
            id: 1,
            title: None,
            poster: None,
            clear_poster: false,
            rating: None,
            clear_rating: false,
            watched: None,
            unwatch: false,
            genres: None,
            description: None,
            clear_description: false,
            year: None,
            clear_year: false,
        }
    }

    #[test]
    fn test_no_flags_is_empty_update() {
        assert!(update_from_args(args()).is_empty());
    }

    #[test]
    fn test_set_and_clear() {
        let update = update_from_args(EditArgs {
            rating: Some(7.5),
            clear_poster: true,
            unwatch: true,
            ..args()
        });
        assert_eq!(update.rating, Some(Some(7.5)));
        assert_eq!(update.poster_url, Some(None));
        assert_eq!(update.watched_date, Some(None));
        assert_eq!(update.title, None);
        assert_eq!(update.description, None);
    }

    #[test]
    fn test_empty_genre_list_clears_tags() {
        let update = update_from_args(EditArgs {
            genres: Some(String::new()),
            ..args()
        });
        assert_eq!(update.genre_tags, Some(Default::default()));
    }
}
