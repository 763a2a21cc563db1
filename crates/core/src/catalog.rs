//! Validation for catalog entities (branches, programs, subjects) and
//! resources.

use crate::error::CoreError;

/// The closed set of resource types.
pub const RESOURCE_TYPES: &[&str] = &["syllabus", "lecture", "notes", "book"];

/// Maximum length for catalog codes (`CSE`, `CS301`, ...).
pub const MAX_CODE_LENGTH: usize = 16;

/// Maximum length for display names and titles.
pub const MAX_NAME_LENGTH: usize = 200;

/// Editorial quality score bounds (inclusive).
pub const MAX_QUALITY_SCORE: i32 = 100;

/// Validate a catalog code: non-empty, bounded, alphanumeric with `-`/`_`.
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("code must not be empty".into()));
    }
    if trimmed.len() > MAX_CODE_LENGTH {
        return Err(CoreError::Validation(format!(
            "code must be at most {MAX_CODE_LENGTH} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "code may only contain letters, digits, '-' and '_'".into(),
        ));
    }
    Ok(())
}

/// Validate a display name or title: non-empty and bounded.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a resource type against the closed set.
pub fn validate_resource_type(resource_type: &str) -> Result<(), CoreError> {
    if RESOURCE_TYPES.contains(&resource_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "resource type must be one of {RESOURCE_TYPES:?}, got '{resource_type}'"
        )))
    }
}

/// Validate a resource URL. Only http(s) links are accepted.
pub fn validate_url(url: &str) -> Result<(), CoreError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "url must start with http:// or https://".into(),
        ))
    }
}

/// Validate an editorial quality score (0-100).
pub fn validate_quality_score(score: i32) -> Result<(), CoreError> {
    if (0..=MAX_QUALITY_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "quality score must be between 0 and {MAX_QUALITY_SCORE}, got {score}"
        )))
    }
}
