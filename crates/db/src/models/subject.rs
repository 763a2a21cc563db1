//! Subject models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campushub_core::types::{DbId, Timestamp};

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub branch_id: DbId,
    pub semester_id: DbId,
    pub credits: i32,
    pub topics: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a subject.
#[derive(Debug, Deserialize)]
pub struct CreateSubject {
    pub code: String,
    pub name: String,
    pub branch_id: DbId,
    pub semester_id: DbId,
    pub credits: Option<i32>,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// DTO for updating a subject.
#[derive(Debug, Deserialize)]
pub struct UpdateSubject {
    pub name: Option<String>,
    pub credits: Option<i32>,
    pub topics: Option<Vec<String>>,
}

/// Conjunctive filter for subject listings.
#[derive(Debug, Default)]
pub struct SubjectFilter {
    pub branch_id: Option<DbId>,
    pub semester_id: Option<DbId>,
    /// ILIKE pattern matched against code and name.
    pub name_like: Option<String>,
}
