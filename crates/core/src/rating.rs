//! Rating validation.
//!
//! The denormalized `average_rating`/`total_ratings` cache on resources is
//! recomputed inside the same transaction as every rating write (see
//! `RatingRepo`), so only input validation lives here.

use crate::error::CoreError;

/// Lowest accepted rating value.
pub const MIN_RATING: i16 = 1;

/// Highest accepted rating value.
pub const MAX_RATING: i16 = 5;

/// Validate a submitted rating value.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}
