use chrono::NaiveDate;
use moviediary_catalog::types::*;
use moviediary_catalog::ValidationError;
use moviediary_db::*;
use tempfile::TempDir;

fn inception() -> NewMovie {
    NewMovie::new("Inception")
        .rating(9.0)
        .poster_url("https://image.tmdb.org/t/p/w500/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg")
        .genres(["Sci-Fi", "Action"])
        .description("A thief who steals corporate secrets through dream-sharing technology.")
        .release_year(2010)
}

fn movie_count(conn: &rusqlite::Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn add_then_get_round_trips() {
    let conn = open_memory().unwrap();
    let watched = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let id = add_movie(&conn, &inception().watched_on(watched)).unwrap();

    let movie = get_movie(&conn, id).unwrap();
    assert_eq!(movie.id, id);
    assert_eq!(movie.title, "Inception");
    assert_eq!(movie.rating, Some(9.0));
    assert_eq!(movie.watched_date, Some(watched));
    assert_eq!(movie.release_year, Some(2010));
    assert!(movie.genre_tags.contains("Sci-Fi"));
    assert!(movie.genre_tags.contains("Action"));
    assert_eq!(movie, inception().watched_on(watched).into_entry(id).unwrap());
}

#[test]
fn first_id_is_one() {
    let conn = open_memory().unwrap();
    assert_eq!(add_movie(&conn, &inception()).unwrap(), MovieId(1));
}

#[test]
fn add_rejects_empty_title_without_writing() {
    let conn = open_memory().unwrap();
    let err = add_movie(&conn, &NewMovie::new("   ").rating(5.0)).unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::EmptyTitle)));
    assert_eq!(movie_count(&conn), 0);
}

#[test]
fn add_rejects_out_of_range_rating_without_writing() {
    let conn = open_memory().unwrap();
    for rating in [-1.0, 10.01, 42.0] {
        let err = add_movie(&conn, &NewMovie::new("Heat").rating(rating)).unwrap_err();
        assert!(err.is_validation(), "rating {rating} should be rejected");
    }
    assert_eq!(movie_count(&conn), 0);
}

#[test]
fn get_unknown_id_is_not_found() {
    let conn = open_memory().unwrap();
    let err = get_movie(&conn, MovieId(99)).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id } if id == MovieId(99)));
    assert_eq!(err.to_string(), "Movie 99 not found");
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    let conn = open_memory().unwrap();
    let id = add_movie(&conn, &inception()).unwrap();

    let update = MovieUpdate {
        title: Some("Inception (2010)".to_string()),
        rating: Some(Some(8.5)),
        poster_url: Some(None),
        genre_tags: Some(parse_genre_tags("Thriller")),
        ..MovieUpdate::default()
    };
    let updated = update_movie(&conn, id, &update).unwrap();
    assert_eq!(updated.id, id);

    let stored = get_movie(&conn, id).unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.title, "Inception (2010)");
    assert_eq!(stored.rating, Some(8.5));
    assert_eq!(stored.poster_url, None);
    assert_eq!(stored.genre_tags.len(), 1);
    assert!(stored.has_genre("thriller"));
    // untouched
    assert_eq!(stored.release_year, Some(2010));
}

#[test]
fn update_without_genres_keeps_tags() {
    let conn = open_memory().unwrap();
    let id = add_movie(&conn, &inception()).unwrap();
    let update = MovieUpdate {
        watched_date: Some(NaiveDate::from_ymd_opt(2024, 6, 1)),
        ..MovieUpdate::default()
    };
    update_movie(&conn, id, &update).unwrap();
    assert_eq!(get_movie(&conn, id).unwrap().genre_tags.len(), 2);
}

#[test]
fn invalid_update_leaves_row_untouched() {
    let conn = open_memory().unwrap();
    let id = add_movie(&conn, &inception()).unwrap();
    let before = get_movie(&conn, id).unwrap();

    let update = MovieUpdate {
        title: Some("Renamed".to_string()),
        rating: Some(Some(11.0)),
        ..MovieUpdate::default()
    };
    let err = update_movie(&conn, id, &update).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::RatingOutOfRange { .. })
    ));
    assert_eq!(get_movie(&conn, id).unwrap(), before);
}

#[test]
fn update_unknown_id_is_not_found() {
    let conn = open_memory().unwrap();
    let update = MovieUpdate {
        title: Some("Nope".to_string()),
        ..MovieUpdate::default()
    };
    assert!(update_movie(&conn, MovieId(5), &update).unwrap_err().is_not_found());
}

#[test]
fn deleted_id_is_gone_for_every_operation() {
    let conn = open_memory().unwrap();
    let id = add_movie(&conn, &inception()).unwrap();
    delete_movie(&conn, id).unwrap();

    assert!(get_movie(&conn, id).unwrap_err().is_not_found());
    let update = MovieUpdate {
        rating: Some(Some(1.0)),
        ..MovieUpdate::default()
    };
    assert!(update_movie(&conn, id, &update).unwrap_err().is_not_found());
    assert!(delete_movie(&conn, id).unwrap_err().is_not_found());
}

#[test]
fn delete_cascades_genres() {
    let conn = open_memory().unwrap();
    let id = add_movie(&conn, &inception()).unwrap();
    delete_movie(&conn, id).unwrap();
    let tags: i64 = conn
        .query_row("SELECT COUNT(*) FROM movie_genres", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tags, 0);
}

#[test]
fn deleted_ids_are_never_reissued() {
    let conn = open_memory().unwrap();
    let first = add_movie(&conn, &inception()).unwrap();
    let second = add_movie(&conn, &NewMovie::new("Heat")).unwrap();
    delete_movie(&conn, second).unwrap();
    delete_movie(&conn, first).unwrap();

    let third = add_movie(&conn, &NewMovie::new("Alien")).unwrap();
    assert!(third > second);
}

#[test]
fn scenario_from_add_to_not_found() {
    let conn = open_memory().unwrap();
    let id = add_movie(&conn, &NewMovie::new("Inception").rating(9.0)).unwrap();
    assert_eq!(id, MovieId(1));
    assert!(add_movie(&conn, &NewMovie::new("").rating(5.0))
        .unwrap_err()
        .is_validation());
    delete_movie(&conn, id).unwrap();
    assert!(get_movie(&conn, MovieId(1)).unwrap_err().is_not_found());
}

#[test]
fn find_by_title_matches_case_insensitively_and_by_year() {
    let conn = open_memory().unwrap();
    let id = add_movie(&conn, &inception()).unwrap();
    assert_eq!(
        find_movie_by_title(&conn, "inception", Some(2010)).unwrap(),
        Some(id)
    );
    assert_eq!(find_movie_by_title(&conn, "Inception", None).unwrap(), None);
    assert_eq!(find_movie_by_title(&conn, "Heat", Some(2010)).unwrap(), None);
}

#[test]
fn seed_is_idempotent() {
    let conn = open_memory().unwrap();
    let movies = vec![inception(), NewMovie::new("The Matrix").release_year(1999)];

    let first = seed_movies(&conn, &movies).unwrap();
    assert_eq!(first, SeedStats { added: 2, skipped: 0 });

    let second = seed_movies(&conn, &movies).unwrap();
    assert_eq!(second, SeedStats { added: 0, skipped: 2 });
    assert_eq!(movie_count(&conn), 2);
}

#[test]
fn seed_rejects_whole_batch_on_invalid_record() {
    let conn = open_memory().unwrap();
    let movies = vec![inception(), NewMovie::new("")];
    assert!(seed_movies(&conn, &movies).unwrap_err().is_validation());
    assert_eq!(movie_count(&conn), 0);
}

#[test]
fn seed_from_yaml_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("movies.yaml");
    std::fs::write(
        &path,
        "- title: Pulp Fiction\n  release_year: 1994\n  genre_tags: \"Crime, Drama\"\n",
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let stats = seed_from_yaml(&conn, &path).unwrap();
    assert_eq!(stats.added, 1);

    let id = find_movie_by_title(&conn, "Pulp Fiction", Some(1994))
        .unwrap()
        .unwrap();
    assert!(get_movie(&conn, id).unwrap().has_genre("crime"));
}

#[test]
fn seed_from_missing_file_is_seed_error() {
    let tmp = TempDir::new().unwrap();
    let conn = open_memory().unwrap();
    let err = seed_from_yaml(&conn, &tmp.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, StoreError::Seed(_)));
}
