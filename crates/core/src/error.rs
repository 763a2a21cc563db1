//! Domain error taxonomy shared by the repository and API layers.

/// Domain-level errors. The API layer maps each variant onto an HTTP status
/// via `AppError: IntoResponse`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Input failed validation (maps to 400).
    #[error("{0}")]
    Validation(String),

    /// A uniqueness or state conflict (maps to 409).
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid credentials (maps to 401).
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (maps to 403).
    #[error("{0}")]
    Forbidden(String),

    /// Deletion blocked because dependent rows still reference the entity.
    /// The store has no foreign-key cascade for these relations, so the
    /// guard is enforced in the application (maps to 400).
    #[error("cannot delete {entity}: {count} dependent {dependent} still reference it")]
    DependentChildren {
        entity: &'static str,
        dependent: &'static str,
        count: i64,
    },

    /// An unexpected internal error (maps to 500, message logged server-side).
    #[error("{0}")]
    Internal(String),
}
