//! Route definitions for the catalog hierarchy.
//!
//! Mounted directly under `/api/v1` (branches, programs, years, semesters
//! are top-level resources, not nested paths).

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes.
///
/// ```text
/// GET    /branches       -> list_branches
/// POST   /branches       -> create_branch (admin)
/// GET    /branches/{id}  -> get_branch
/// PUT    /branches/{id}  -> update_branch (admin)
/// DELETE /branches/{id}  -> delete_branch (admin, dependent guard)
/// GET    /programs       -> list_programs (?branch=)
/// POST   /programs       -> create_program (admin)
/// GET    /programs/{id}  -> get_program
/// PUT    /programs/{id}  -> update_program (admin)
/// DELETE /programs/{id}  -> delete_program (admin)
/// GET    /years          -> list_years (?program=)
/// POST   /years          -> create_year (admin)
/// GET    /semesters      -> list_semesters (?year=)
/// POST   /semesters      -> create_semester (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/branches",
            get(catalog::list_branches).post(catalog::create_branch),
        )
        .route(
            "/branches/{id}",
            get(catalog::get_branch)
                .put(catalog::update_branch)
                .delete(catalog::delete_branch),
        )
        .route(
            "/programs",
            get(catalog::list_programs).post(catalog::create_program),
        )
        .route(
            "/programs/{id}",
            get(catalog::get_program)
                .put(catalog::update_program)
                .delete(catalog::delete_program),
        )
        .route("/years", get(catalog::list_years).post(catalog::create_year))
        .route(
            "/semesters",
            get(catalog::list_semesters).post(catalog::create_semester),
        )
}
