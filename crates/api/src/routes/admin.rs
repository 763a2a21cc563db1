//! Route definitions for the admin back office.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// GET  /dashboard                 -> dashboard (admin)
/// GET  /resources                 -> list_resources (moderator)
/// POST /resources/{id}/approve    -> approve_resource (moderator)
/// POST /resources/{id}/reject     -> reject_resource (moderator)
/// GET  /roadmaps                  -> list_roadmaps (moderator)
/// POST /roadmaps/{id}/approve     -> approve_roadmap (moderator)
/// POST /roadmaps/{id}/reject      -> reject_roadmap (moderator)
/// GET  /users                     -> list_users (admin)
/// POST /users                     -> create_user (admin)
/// GET  /users/{id}                -> get_user (admin)
/// PUT  /users/{id}                -> update_user (admin)
/// DELETE /users/{id}              -> delete_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/resources", get(admin::list_resources))
        .route("/resources/{id}/approve", post(admin::approve_resource))
        .route("/resources/{id}/reject", post(admin::reject_resource))
        .route("/roadmaps", get(admin::list_roadmaps))
        .route("/roadmaps/{id}/approve", post(admin::approve_roadmap))
        .route("/roadmaps/{id}/reject", post(admin::reject_roadmap))
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
}
