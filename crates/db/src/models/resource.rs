//! Resource models, DTOs, and the listing filter.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campushub_core::types::{DbId, Timestamp};

/// A row from the `resources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub resource_type: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub subject_id: DbId,
    pub topics: Vec<String>,
    pub tags: Vec<String>,
    pub added_by: Option<DbId>,
    pub is_approved: bool,
    pub quality_score: i32,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A listing row with foreign keys expanded to a small projected subset
/// (read-time join, not stored redundantly).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResourceListRow {
    pub id: DbId,
    pub resource_type: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub subject_id: DbId,
    pub subject_code: String,
    pub subject_name: String,
    pub tags: Vec<String>,
    pub added_by: Option<DbId>,
    pub added_by_name: Option<String>,
    pub is_approved: bool,
    pub quality_score: i32,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub created_at: Timestamp,
}

/// DTO for inserting a resource. Approval and quality score are decided by
/// the handler (role-dependent), not taken from client input directly.
#[derive(Debug)]
pub struct CreateResource {
    pub resource_type: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub subject_id: DbId,
    pub topics: Vec<String>,
    pub tags: Vec<String>,
    pub added_by: Option<DbId>,
    pub is_approved: bool,
    pub quality_score: i32,
}

/// DTO for updating a resource.
#[derive(Debug, Deserialize)]
pub struct UpdateResource {
    pub resource_type: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub topics: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub quality_score: Option<i32>,
}

/// Conjunctive filter for resource listings and search.
///
/// Built by the handler from validated query parameters; the repository maps
/// it onto a static SQL predicate. `approved` is `Some(true)` for every
/// public query; only admin variants may pass `None` or `Some(false)`.
#[derive(Debug, Default)]
pub struct ResourceFilter {
    pub resource_type: Option<String>,
    pub subject_id: Option<DbId>,
    pub branch_id: Option<DbId>,
    pub semester_id: Option<DbId>,
    pub approved: Option<bool>,
    /// Sanitized tsquery string (see `campushub_core::search::build_tsquery`).
    pub tsquery: Option<String>,
}
