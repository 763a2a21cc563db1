//! Route definitions for resources and their ratings.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{rating, resource};
use crate::state::AppState;

/// Resource routes mounted at `/resources`.
///
/// ```text
/// GET    /              -> list_resources (public, approved only)
/// POST   /              -> create_resource (auth)
/// GET    /{id}          -> get_resource (pending: owner/moderator only)
/// PUT    /{id}          -> update_resource (owner or admin)
/// DELETE /{id}          -> delete_resource (owner or admin)
/// PUT    /{id}/rating   -> rate_resource (auth, upsert)
/// DELETE /{id}/rating   -> delete_rating (auth, own rating)
/// GET    /{id}/ratings  -> list_ratings (paginated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(resource::list_resources).post(resource::create_resource),
        )
        .route(
            "/{id}",
            get(resource::get_resource)
                .put(resource::update_resource)
                .delete(resource::delete_resource),
        )
        .route(
            "/{id}/rating",
            put(rating::rate_resource).delete(rating::delete_rating),
        )
        .route("/{id}/ratings", get(rating::list_ratings))
}
