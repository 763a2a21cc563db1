//! Roadmap models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use campushub_core::types::{DbId, Timestamp};

/// A row from the `roadmaps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Roadmap {
    pub id: DbId,
    pub subject_id: DbId,
    pub roadmap_type: String,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub total_estimated_hours: f64,
    pub created_by: Option<DbId>,
    pub is_public: bool,
    pub is_approved: bool,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `roadmap_steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoadmapStep {
    pub id: DbId,
    pub roadmap_id: DbId,
    pub step_order: i32,
    pub title: String,
    pub description: Option<String>,
    pub estimated_hours: f64,
    pub prerequisites: Vec<String>,
}

/// A step with its referenced resource ids expanded.
#[derive(Debug, Clone, Serialize)]
pub struct StepWithResources {
    #[serde(flatten)]
    pub step: RoadmapStep,
    pub resource_ids: Vec<DbId>,
}

/// A roadmap with its full steps array.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapDetail {
    #[serde(flatten)]
    pub roadmap: Roadmap,
    pub steps: Vec<StepWithResources>,
}

/// DTO for inserting a roadmap header row. Steps are written in the same
/// transaction and `total_estimated_hours` is derived from them, so neither
/// appears here.
#[derive(Debug)]
pub struct CreateRoadmap {
    pub subject_id: DbId,
    pub roadmap_type: String,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub created_by: Option<DbId>,
    pub is_public: bool,
    pub is_approved: bool,
    pub tags: Vec<String>,
}

/// DTO for updating a roadmap header row.
#[derive(Debug, Deserialize)]
pub struct UpdateRoadmap {
    pub roadmap_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Conjunctive filter for roadmap listings.
#[derive(Debug, Default)]
pub struct RoadmapFilter {
    pub subject_id: Option<DbId>,
    pub difficulty: Option<String>,
    /// ILIKE pattern matched against title and description.
    pub title_like: Option<String>,
    /// Restrict to public + approved roadmaps (the non-admin view).
    pub public_only: bool,
    pub approved: Option<bool>,
}
