pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod resource;
pub mod roadmap;
pub mod subject;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             current user (requires auth)
///
/// /branches                            list, create (admin)
/// /branches/{id}                       get, update, delete (admin, guarded)
/// /programs                            list (?branch=), create (admin)
/// /programs/{id}                       get, update, delete (admin)
/// /years                               list (?program=), create (admin)
/// /semesters                           list (?year=), create (admin)
///
/// /subjects                            list (?branch=&semester=&q=, paginated),
///                                      create (admin)
/// /subjects/{id}                       get, update, delete (admin, guarded)
///
/// /resources                           list/search (public, approved only),
///                                      create (auth)
/// /resources/{id}                      get, update, delete (owner or admin)
/// /resources/{id}/rating               rate (PUT), remove own rating (DELETE)
/// /resources/{id}/ratings              list ratings (paginated)
///
/// /roadmaps                            list (public+approved), create (auth)
/// /roadmaps/{id}                       get detail, update, delete (owner or admin)
///
/// /admin/dashboard                     aggregate counts (admin)
/// /admin/resources                     moderation listing (moderator)
/// /admin/resources/{id}/approve        approve (moderator)
/// /admin/resources/{id}/reject         reject (moderator)
/// /admin/roadmaps                      moderation listing (moderator)
/// /admin/roadmaps/{id}/approve         approve (moderator)
/// /admin/roadmaps/{id}/reject          reject (moderator)
/// /admin/users                         list, create (admin)
/// /admin/users/{id}                    get, update, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Catalog hierarchy (branches, programs, years, semesters).
        .merge(catalog::router())
        // Subjects (catalog leaf; anchors resources and roadmaps).
        .nest("/subjects", subject::router())
        // Resources (also nests ratings).
        .nest("/resources", resource::router())
        // Study roadmaps with embedded steps.
        .nest("/roadmaps", roadmap::router())
        // Admin back office (dashboard, moderation, user management).
        .nest("/admin", admin::router())
}
