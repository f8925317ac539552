use std::path::Path;

use moviediary_catalog::{MovieQuery, parse_preference_list};

use crate::CliError;
use crate::cli_types::QueryArgs;

pub(crate) fn run_list(db_path: &Path, json: bool) -> Result<(), CliError> {
    let store = super::open_store(db_path)?;
    let entries: Vec<_> = store.list()?.collect();
    super::print_entries(&entries, json)
}

pub(crate) fn run_query(db_path: &Path, args: QueryArgs) -> Result<(), CliError> {
    let json = args.json;
    let query = query_from_args(args);
    log::debug!("Running {:?}", query);

    let store = super::open_store(db_path)?;
    let entries = store.query(&query)?;
    super::print_entries(&entries, json)
}

pub(crate) fn run_search(db_path: &Path, text: &str) -> Result<(), CliError> {
    let store = super::open_store(db_path)?;
    let entries = store.search(text)?;
    super::print_entries(&entries, false)
}

pub(crate) fn run_feed(db_path: &Path, genres: &str, limit: Option<usize>) -> Result<(), CliError> {
    let preferred = parse_preference_list(genres);
    if preferred.is_empty() {
        return Err(CliError::invalid_argument(
            "give at least one preferred genre, e.g. \"Sci-Fi,Drama\"",
        ));
    }

    let store = super::open_store(db_path)?;
    let mut entries = store.by_preference(&preferred)?;
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    log::info!("Feed for {}", preferred.join(" > "));
    crate::log_blank();
    super::print_entries(&entries, false)
}

fn query_from_args(args: QueryArgs) -> MovieQuery {
    let mut query = MovieQuery::new();
    if let Some(title) = args.title {
        query = query.title_contains(title);
    }
    if let Some(genre) = args.genre {
        query = query.genre(genre);
    }
    if let Some(min) = args.min_rating {
        query = query.min_rating(min);
    }
    if args.watched {
        query = query.watched_only(true);
    }
    if let Some(status) = args.status {
        query = query.status(status);
    }
    if let Some(from) = args.watched_from {
        query = query.watched_from(from);
    }
    if let Some(to) = args.watched_to {
        query = query.watched_to(to);
    }
    if let Some(sort) = args.sort {
        query = query.sort_by(sort);
        if args.desc {
            query = query.descending();
        }
    }
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    query
}
