use chrono::NaiveDate;
use moviediary_catalog::*;

fn entry(id: i64, movie: NewMovie) -> MovieEntry {
    movie.into_entry(MovieId(id)).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample() -> Vec<MovieEntry> {
    vec![
        entry(
            1,
            NewMovie::new("The Matrix")
                .rating(9.0)
                .genres(["Action", "Sci-Fi"])
                .watched_on(date(2024, 2, 10)),
        ),
        entry(
            2,
            NewMovie::new("Inception")
                .rating(8.0)
                .genres(["Sci-Fi", "Action"])
                .description("A thief who steals corporate secrets through dream-sharing."),
        ),
        entry(
            3,
            NewMovie::new("The Godfather")
                .rating(8.0)
                .genres(["Crime", "Drama"])
                .watched_on(date(2023, 11, 1)),
        ),
        entry(4, NewMovie::new("matrix reloaded").genre("Action")),
        entry(5, NewMovie::new("Forrest Gump").genres(["Drama", "Romance"])),
    ]
}

fn ids(entries: &[MovieEntry]) -> Vec<i64> {
    entries.iter().map(|e| e.id.0).collect()
}

#[test]
fn empty_query_returns_everything_in_id_order() {
    let mut shuffled = sample();
    shuffled.reverse();
    let result = MovieQuery::new().apply(shuffled);
    assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
}

#[test]
fn title_contains_is_case_insensitive() {
    let result = MovieQuery::new().title_contains("Matrix").apply(sample());
    assert_eq!(ids(&result), vec![1, 4]);
    assert!(result.iter().all(|e| e.title.to_lowercase().contains("matrix")));
}

#[test]
fn blank_title_filter_is_ignored() {
    let result = MovieQuery::new().title_contains("   ").apply(sample());
    assert_eq!(result.len(), 5);
}

#[test]
fn filters_are_conjunctive() {
    let result = MovieQuery::new()
        .genre("action")
        .min_rating(8.5)
        .apply(sample());
    assert_eq!(ids(&result), vec![1]);

    let result = MovieQuery::new()
        .genre("drama")
        .watched_only(true)
        .apply(sample());
    assert_eq!(ids(&result), vec![3]);
}

#[test]
fn min_rating_excludes_unrated() {
    let result = MovieQuery::new().min_rating(0.0).apply(sample());
    assert_eq!(ids(&result), vec![1, 2, 3]);
}

#[test]
fn watched_only_false_applies_no_filter() {
    let result = MovieQuery::new().watched_only(false).apply(sample());
    assert_eq!(result.len(), 5);
}

#[test]
fn status_filter_selects_wishlist() {
    let result = MovieQuery::new().status(DiaryStatus::Wishlist).apply(sample());
    assert_eq!(ids(&result), vec![2, 4, 5]);
}

#[test]
fn no_match_is_empty_not_error() {
    let result = MovieQuery::new().genre("Western").apply(sample());
    assert!(result.is_empty());
}

#[test]
fn rating_sort_is_stable_by_id() {
    let result = MovieQuery::new().sort_by(SortBy::Rating).apply(sample());
    // 8.0 (id 2), 8.0 (id 3), 9.0 (id 1), then unrated 4, 5
    assert_eq!(ids(&result), vec![2, 3, 1, 4, 5]);
}

#[test]
fn rating_sort_descending_keeps_id_tiebreak_and_unrated_last() {
    let result = MovieQuery::new()
        .sort_by(SortBy::Rating)
        .descending()
        .apply(sample());
    assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
}

#[test]
fn title_sort_ignores_case() {
    let result = MovieQuery::new().sort_by(SortBy::Title).apply(sample());
    let titles: Vec<_> = result.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Forrest Gump",
            "Inception",
            "matrix reloaded",
            "The Godfather",
            "The Matrix"
        ]
    );
}

#[test]
fn watched_date_sort_puts_unwatched_last() {
    let result = MovieQuery::new().sort_by(SortBy::WatchedDate).apply(sample());
    assert_eq!(ids(&result), vec![3, 1, 2, 4, 5]);
}

#[test]
fn limit_truncates_after_sorting() {
    let result = MovieQuery::new()
        .sort_by(SortBy::Rating)
        .descending()
        .limit(2)
        .apply(sample());
    assert_eq!(ids(&result), vec![1, 2]);
}

#[test]
fn sort_key_parsing() {
    assert_eq!("Rating".parse::<SortBy>(), Ok(SortBy::Rating));
    assert_eq!("watched-date".parse::<SortBy>(), Ok(SortBy::WatchedDate));
    assert!("year".parse::<SortBy>().is_err());
}

#[test]
fn search_covers_title_genre_and_description() {
    assert_eq!(ids(&search(sample(), "dream")), vec![2]);
    assert_eq!(ids(&search(sample(), "ROMANCE")), vec![5]);
    // Title order: "matrix reloaded" < "The Matrix"
    assert_eq!(ids(&search(sample(), "matrix")), vec![4, 1]);
    assert_eq!(search(sample(), "  ").len(), 5);
}

#[test]
fn preferences_rank_earlier_genres_first() {
    let prefs = parse_preference_list("Drama, Sci-Fi, drama");
    assert_eq!(prefs, vec!["Drama".to_string(), "Sci-Fi".to_string()]);

    let ranked = rank_by_preferences(sample(), &prefs);
    // Drama: Forrest Gump, The Godfather; Sci-Fi: Inception, The Matrix; rest
    assert_eq!(ids(&ranked), vec![5, 3, 2, 1, 4]);
}

#[test]
fn empty_preferences_fall_back_to_title_order() {
    let ranked = rank_by_preferences(sample(), &[]);
    assert_eq!(ids(&ranked), vec![5, 2, 4, 3, 1]);
}

#[test]
fn watched_range_includes_both_ends() {
    let result = MovieQuery::new()
        .watched_between(date(2023, 11, 1), date(2024, 2, 10))
        .apply(sample());
    assert_eq!(ids(&result), vec![1, 3]);

    let result = MovieQuery::new()
        .watched_between(date(2023, 11, 2), date(2024, 2, 9))
        .apply(sample());
    assert!(result.is_empty());
}

#[test]
fn open_ended_watched_range() {
    let since = MovieQuery::new().watched_from(date(2024, 1, 1)).apply(sample());
    assert_eq!(ids(&since), vec![1]);

    let until = MovieQuery::new().watched_to(date(2023, 12, 31)).apply(sample());
    assert_eq!(ids(&until), vec![3]);
}

#[test]
fn watched_range_excludes_unwatched_movies() {
    let result = MovieQuery::new()
        .watched_between(date(1900, 1, 1), date(2100, 1, 1))
        .apply(sample());
    assert_eq!(ids(&result), vec![1, 3]);
    assert!(result.iter().all(|e| e.is_watched()));
}

#[test]
fn watched_range_combines_with_genre() {
    let result = MovieQuery::new()
        .genre("drama")
        .watched_from(date(2023, 1, 1))
        .apply(sample());
    assert_eq!(ids(&result), vec![3]);

    let result = MovieQuery::new()
        .genre("romance")
        .watched_from(date(2023, 1, 1))
        .apply(sample());
    assert!(result.is_empty());
}

#[test]
fn inverted_watched_range_matches_nothing() {
    let result = MovieQuery::new()
        .watched_between(date(2024, 12, 31), date(2023, 1, 1))
        .apply(sample());
    assert!(result.is_empty());
}
