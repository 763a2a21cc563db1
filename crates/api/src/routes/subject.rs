//! Route definitions for subjects.

use axum::routing::get;
use axum::Router;

use crate::handlers::subject;
use crate::state::AppState;

/// Subject routes mounted at `/subjects`.
///
/// ```text
/// GET    /      -> list_subjects (?branch=&semester=&q=, paginated)
/// POST   /      -> create_subject (admin)
/// GET    /{id}  -> get_subject
/// PUT    /{id}  -> update_subject (admin)
/// DELETE /{id}  -> delete_subject (admin, dependent guard)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(subject::list_subjects).post(subject::create_subject),
        )
        .route(
            "/{id}",
            get(subject::get_subject)
                .put(subject::update_subject)
                .delete(subject::delete_subject),
        )
}
