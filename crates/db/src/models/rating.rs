//! Resource rating models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campushub_core::types::{DbId, Timestamp};

/// A row from the `resource_ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResourceRating {
    pub id: DbId,
    pub resource_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub review: Option<String>,
    pub helpful_votes: i32,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A rating listing row with the rater's name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingListRow {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub rating: i16,
    pub review: Option<String>,
    pub helpful_votes: i32,
    pub is_verified: bool,
    pub created_at: Timestamp,
}

/// DTO for creating or replacing the caller's rating of a resource.
#[derive(Debug, Deserialize)]
pub struct UpsertRating {
    pub rating: i16,
    pub review: Option<String>,
}
