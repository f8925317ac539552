//! Invariant checks shared by add and update.

use thiserror::Error;

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 0.0;
/// Highest accepted rating.
pub const MAX_RATING: f64 = 10.0;
/// Release years outside this range are rejected as typos.
pub const RELEASE_YEARS: std::ops::RangeInclusive<i32> = 1888..=2100;

/// A movie field violates a catalog invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("rating {rating} is outside the range 0..=10")]
    RatingOutOfRange { rating: f64 },

    #[error("rating must be a finite number")]
    RatingNotFinite,

    #[error("release year {year} is outside the range 1888..=2100")]
    ReleaseYearOutOfRange { year: i32 },
}

/// Returns the trimmed title, or `EmptyTitle` if nothing is left.
pub fn title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

pub fn rating(rating: Option<f64>) -> Result<(), ValidationError> {
    match rating {
        None => Ok(()),
        Some(r) if !r.is_finite() => Err(ValidationError::RatingNotFinite),
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => {
            Err(ValidationError::RatingOutOfRange { rating: r })
        }
        Some(_) => Ok(()),
    }
}

pub fn release_year(year: Option<i32>) -> Result<(), ValidationError> {
    match year {
        Some(y) if !RELEASE_YEARS.contains(&y) => {
            Err(ValidationError::ReleaseYearOutOfRange { year: y })
        }
        _ => Ok(()),
    }
}
