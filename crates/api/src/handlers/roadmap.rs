//! Handlers for the `/roadmaps` resource.
//!
//! Roadmaps embed their steps: creation and update take the full steps array,
//! the repository persists them atomically with the header, and the derived
//! hours total is never accepted from the client.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campushub_core::catalog::validate_name;
use campushub_core::error::CoreError;
use campushub_core::pagination::{Page, PageMeta};
use campushub_core::roadmap::{
    validate_difficulty, validate_roadmap_type, validate_steps, StepInput,
};
use campushub_core::search::like_pattern;
use campushub_core::types::DbId;
use campushub_db::models::roadmap::{CreateRoadmap, Roadmap, RoadmapFilter, UpdateRoadmap};
use campushub_db::repositories::RoadmapRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /roadmaps`.
#[derive(Debug, Deserialize)]
pub struct RoadmapListQuery {
    pub subject: Option<DbId>,
    pub difficulty: Option<String>,
    /// Substring matched against title and description.
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Request body for `POST /roadmaps`.
#[derive(Debug, Deserialize)]
pub struct CreateRoadmapRequest {
    pub subject_id: DbId,
    pub roadmap_type: String,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub steps: Vec<StepInput>,
}

fn default_public() -> bool {
    true
}

/// Request body for `PUT /roadmaps/{id}`.
///
/// Header fields are partial; `steps`, when present, replaces the whole array.
#[derive(Debug, Deserialize)]
pub struct UpdateRoadmapRequest {
    #[serde(flatten)]
    pub header: UpdateRoadmap,
    pub steps: Option<Vec<StepInput>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/roadmaps?subject=&difficulty=&q=&page=&limit=
///
/// Public listing: only public and approved roadmaps appear.
pub async fn list_roadmaps(
    State(state): State<AppState>,
    Query(query): Query<RoadmapListQuery>,
) -> AppResult<impl IntoResponse> {
    let page = Page::from_params(query.page, query.limit)?;

    if let Some(difficulty) = &query.difficulty {
        validate_difficulty(difficulty)?;
    }

    let filter = RoadmapFilter {
        subject_id: query.subject,
        difficulty: query.difficulty,
        title_like: query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(like_pattern),
        public_only: true,
        approved: None,
    };

    let rows = RoadmapRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = RoadmapRepo::count_listed(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: rows,
        pagination: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/roadmaps (auth required)
///
/// Steps come embedded; `step_order` is assigned from array position and
/// `total_estimated_hours` derived from the step hours.
pub async fn create_roadmap(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRoadmapRequest>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.title)?;
    validate_roadmap_type(&input.roadmap_type)?;
    validate_difficulty(&input.difficulty)?;
    validate_steps(&input.steps)?;

    let create = CreateRoadmap {
        subject_id: input.subject_id,
        roadmap_type: input.roadmap_type,
        title: input.title,
        description: input.description,
        difficulty: input.difficulty,
        created_by: Some(auth_user.user_id),
        is_public: input.is_public,
        is_approved: auth_user.role.can_moderate(),
        tags: input.tags,
    };
    let roadmap = RoadmapRepo::create(&state.pool, &create, &input.steps).await?;

    tracing::info!(
        roadmap_id = roadmap.id,
        subject_id = roadmap.subject_id,
        steps = input.steps.len(),
        user_id = auth_user.user_id,
        "Roadmap created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: roadmap })))
}

/// GET /api/v1/roadmaps/{id}
///
/// Returns the roadmap with ordered steps and each step's resource refs.
/// Private or pending roadmaps are visible to their owner and moderators
/// only; everyone else gets a 404.
pub async fn get_roadmap(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = RoadmapRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "roadmap",
            id,
        }))?;

    let visible = (detail.roadmap.is_public && detail.roadmap.is_approved)
        || can_view_hidden(viewer, &detail.roadmap);
    if !visible {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "roadmap",
            id,
        }));
    }

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/roadmaps/{id} (owner or admin)
///
/// Resupplying `steps` replaces them wholesale and recomputes the total.
pub async fn update_roadmap(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoadmapRequest>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, id, auth_user).await?;

    if let Some(title) = &input.header.title {
        validate_name(title)?;
    }
    if let Some(roadmap_type) = &input.header.roadmap_type {
        validate_roadmap_type(roadmap_type)?;
    }
    if let Some(difficulty) = &input.header.difficulty {
        validate_difficulty(difficulty)?;
    }
    if let Some(steps) = &input.steps {
        validate_steps(steps)?;
    }

    let roadmap = RoadmapRepo::update(&state.pool, id, &input.header, input.steps.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "roadmap",
            id,
        }))?;

    Ok(Json(DataResponse { data: roadmap }))
}

/// DELETE /api/v1/roadmaps/{id} (owner or admin)
///
/// Steps and their resource references go with it (FK cascade).
pub async fn delete_roadmap(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, id, auth_user).await?;

    RoadmapRepo::delete(&state.pool, id).await?;

    tracing::info!(roadmap_id = id, user_id = auth_user.user_id, "Roadmap deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn can_view_hidden(viewer: Option<AuthUser>, roadmap: &Roadmap) -> bool {
    match viewer {
        Some(user) => user.role.can_moderate() || roadmap.created_by == Some(user.user_id),
        None => false,
    }
}

/// Fetch a roadmap and check the principal may mutate it (owner or admin).
async fn find_owned(state: &AppState, id: DbId, auth_user: AuthUser) -> AppResult<Roadmap> {
    let roadmap = RoadmapRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "roadmap",
            id,
        }))?;

    if !auth_user
        .role
        .can_mutate_owned(auth_user.user_id, roadmap.created_by)
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner or an admin may modify this roadmap".into(),
        )));
    }

    Ok(roadmap)
}
