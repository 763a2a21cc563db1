//! Roadmap step validation and derived aggregates.
//!
//! A roadmap's `total_estimated_hours` is derived from its steps and is never
//! settable independently: whenever a steps array is supplied on create or
//! update, the total is recomputed here and persisted alongside the steps.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// The closed set of roadmap difficulty levels.
pub const DIFFICULTIES: &[&str] = &["beginner", "intermediate", "advanced"];

/// The closed set of roadmap types.
pub const ROADMAP_TYPES: &[&str] = &["exam-prep", "semester", "topic", "project"];

/// A roadmap step as submitted by a client. `step_order` is not accepted from
/// input; it is assigned densely from the array position.
#[derive(Debug, Clone, Deserialize)]
pub struct StepInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub estimated_hours: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub resource_ids: Vec<DbId>,
}

/// Validate a submitted steps array.
///
/// Each step needs a non-empty title and non-negative hours. An empty array
/// is allowed (a roadmap may be drafted before its steps exist).
pub fn validate_steps(steps: &[StepInput]) -> Result<(), CoreError> {
    for (idx, step) in steps.iter().enumerate() {
        if step.title.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "step {} has an empty title",
                idx + 1
            )));
        }
        if !step.estimated_hours.is_finite() || step.estimated_hours < 0.0 {
            return Err(CoreError::Validation(format!(
                "step {} has invalid estimated_hours",
                idx + 1
            )));
        }
    }
    Ok(())
}

/// Sum of `estimated_hours` across all steps.
pub fn total_estimated_hours(steps: &[StepInput]) -> f64 {
    steps.iter().map(|s| s.estimated_hours).sum()
}

/// Validate a difficulty value against the closed set.
pub fn validate_difficulty(difficulty: &str) -> Result<(), CoreError> {
    if DIFFICULTIES.contains(&difficulty) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "difficulty must be one of {DIFFICULTIES:?}, got '{difficulty}'"
        )))
    }
}

/// Validate a roadmap type value against the closed set.
pub fn validate_roadmap_type(roadmap_type: &str) -> Result<(), CoreError> {
    if ROADMAP_TYPES.contains(&roadmap_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "roadmap type must be one of {ROADMAP_TYPES:?}, got '{roadmap_type}'"
        )))
    }
}
