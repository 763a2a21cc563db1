//! Handlers for the `/subjects` resource.
//!
//! Subjects are the leaf of the catalog hierarchy and the anchor for
//! resources and roadmaps, so deletion is guarded by a dependent count.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campushub_core::catalog::{validate_code, validate_name};
use campushub_core::error::CoreError;
use campushub_core::pagination::{Page, PageMeta};
use campushub_core::search::like_pattern;
use campushub_core::types::DbId;
use campushub_db::models::subject::{CreateSubject, SubjectFilter, UpdateSubject};
use campushub_db::repositories::SubjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Query parameters for `GET /subjects`.
#[derive(Debug, Deserialize)]
pub struct SubjectListQuery {
    pub branch: Option<DbId>,
    pub semester: Option<DbId>,
    /// Substring matched against code and name.
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/v1/subjects?branch=&semester=&q=&page=&limit=
pub async fn list_subjects(
    State(state): State<AppState>,
    Query(query): Query<SubjectListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = Page::from_params(query.page, query.limit)?;

    let filter = SubjectFilter {
        branch_id: query.branch,
        semester_id: query.semester,
        name_like: query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(like_pattern),
    };

    let subjects = SubjectRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = SubjectRepo::count_listed(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: subjects,
        pagination: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/subjects (admin only)
pub async fn create_subject(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<impl IntoResponse> {
    validate_code(&input.code)?;
    validate_name(&input.name)?;

    let subject = SubjectRepo::create(&state.pool, &input).await?;

    tracing::info!(
        subject_id = subject.id,
        code = %subject.code,
        user_id = admin.user_id,
        "Subject created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

/// GET /api/v1/subjects/{id}
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let subject = SubjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id,
        }))?;
    Ok(Json(DataResponse { data: subject }))
}

/// PUT /api/v1/subjects/{id} (admin only)
pub async fn update_subject(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }

    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id,
        }))?;
    Ok(Json(DataResponse { data: subject }))
}

/// DELETE /api/v1/subjects/{id} (admin only)
///
/// Rejected with 400 while dependent resources or roadmaps exist.
pub async fn delete_subject(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dependents = SubjectRepo::count_dependents(&state.pool, id).await?;
    if dependents > 0 {
        return Err(AppError::Core(CoreError::DependentChildren {
            entity: "subject",
            dependent: "resources or roadmaps",
            count: dependents,
        }));
    }

    let deleted = SubjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "subject",
            id,
        }));
    }

    tracing::info!(subject_id = id, user_id = admin.user_id, "Subject deleted");

    Ok(StatusCode::NO_CONTENT)
}
