//! Route definitions for roadmaps.

use axum::routing::get;
use axum::Router;

use crate::handlers::roadmap;
use crate::state::AppState;

/// Roadmap routes mounted at `/roadmaps`.
///
/// ```text
/// GET    /      -> list_roadmaps (public + approved)
/// POST   /      -> create_roadmap (auth, steps embedded)
/// GET    /{id}  -> get_roadmap (detail with steps + resource refs)
/// PUT    /{id}  -> update_roadmap (owner or admin)
/// DELETE /{id}  -> delete_roadmap (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(roadmap::list_roadmaps).post(roadmap::create_roadmap),
        )
        .route(
            "/{id}",
            get(roadmap::get_roadmap)
                .put(roadmap::update_roadmap)
                .delete(roadmap::delete_roadmap),
        )
}
