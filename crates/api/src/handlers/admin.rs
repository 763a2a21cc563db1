//! Handlers for the admin back office: dashboard counts, moderation queues,
//! and user management.
//!
//! Approval endpoints accept moderators; everything else is admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campushub_core::error::CoreError;
use campushub_core::pagination::{Page, PageMeta};
use campushub_core::roles::Role;
use campushub_core::types::DbId;
use campushub_db::models::resource::ResourceFilter;
use campushub_db::models::roadmap::RoadmapFilter;
use campushub_db::models::user::{CreateUser, UpdateUser, UserResponse};
use campushub_db::repositories::{
    BranchRepo, RatingRepo, ResourceRepo, RoadmapRepo, SubjectRepo, UserRepo,
};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::handlers::PageQuery;
use crate::middleware::rbac::{RequireAdmin, RequireModerator};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub users: i64,
    pub branches: i64,
    pub subjects: i64,
    pub resources: i64,
    pub pending_resources: i64,
    pub roadmaps: i64,
    pub pending_roadmaps: i64,
    pub ratings: i64,
}

/// GET /api/v1/admin/dashboard (admin only)
///
/// All counts run concurrently; the response is a single snapshot.
pub async fn dashboard(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let (users, branches, subjects, resources, pending_resources, roadmaps, pending_roadmaps, ratings) =
        tokio::try_join!(
            UserRepo::count(&state.pool),
            BranchRepo::count(&state.pool),
            SubjectRepo::count(&state.pool),
            ResourceRepo::count_all(&state.pool),
            ResourceRepo::count_pending(&state.pool),
            RoadmapRepo::count_all(&state.pool),
            RoadmapRepo::count_pending(&state.pool),
            RatingRepo::count_all(&state.pool),
        )?;

    Ok(Json(DataResponse {
        data: DashboardCounts {
            users,
            branches,
            subjects,
            resources,
            pending_resources,
            roadmaps,
            pending_roadmaps,
            ratings,
        },
    }))
}

// ---------------------------------------------------------------------------
// Resource moderation
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/resources`.
#[derive(Debug, Deserialize)]
pub struct AdminResourceQuery {
    /// Explicit approval filter; absent means both approved and pending.
    pub approved: Option<bool>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub subject: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/v1/admin/resources?approved=&type=&subject=&page=&limit=
///
/// Moderation listing; unlike the public endpoint, pending rows are included
/// unless `approved` says otherwise.
pub async fn list_resources(
    RequireModerator(_mod): RequireModerator,
    State(state): State<AppState>,
    Query(query): Query<AdminResourceQuery>,
) -> AppResult<impl IntoResponse> {
    let page = Page::from_params(query.page, query.limit)?;

    let filter = ResourceFilter {
        resource_type: query.resource_type,
        subject_id: query.subject,
        approved: query.approved,
        ..Default::default()
    };

    let rows = ResourceRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = ResourceRepo::count(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: rows,
        pagination: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/admin/resources/{id}/approve (moderator or admin)
pub async fn approve_resource(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_resource_approval(&state, id, true, moderator.user_id).await
}

/// POST /api/v1/admin/resources/{id}/reject (moderator or admin)
pub async fn reject_resource(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_resource_approval(&state, id, false, moderator.user_id).await
}

async fn set_resource_approval(
    state: &AppState,
    id: DbId,
    approved: bool,
    moderator_id: DbId,
) -> AppResult<axum::Json<DataResponse<campushub_db::models::resource::Resource>>> {
    let resource = ResourceRepo::set_approval(&state.pool, id, approved)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }))?;

    tracing::info!(
        resource_id = id,
        approved,
        user_id = moderator_id,
        "Resource moderation decision",
    );

    Ok(Json(DataResponse { data: resource }))
}

// ---------------------------------------------------------------------------
// Roadmap moderation
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/roadmaps`.
#[derive(Debug, Deserialize)]
pub struct AdminRoadmapQuery {
    pub approved: Option<bool>,
    pub subject: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/v1/admin/roadmaps?approved=&subject=&page=&limit=
pub async fn list_roadmaps(
    RequireModerator(_mod): RequireModerator,
    State(state): State<AppState>,
    Query(query): Query<AdminRoadmapQuery>,
) -> AppResult<impl IntoResponse> {
    let page = Page::from_params(query.page, query.limit)?;

    let filter = RoadmapFilter {
        subject_id: query.subject,
        approved: query.approved,
        ..Default::default()
    };

    let rows = RoadmapRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = RoadmapRepo::count_listed(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: rows,
        pagination: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/admin/roadmaps/{id}/approve (moderator or admin)
pub async fn approve_roadmap(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_roadmap_approval(&state, id, true, moderator.user_id).await
}

/// POST /api/v1/admin/roadmaps/{id}/reject (moderator or admin)
pub async fn reject_roadmap(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_roadmap_approval(&state, id, false, moderator.user_id).await
}

async fn set_roadmap_approval(
    state: &AppState,
    id: DbId,
    approved: bool,
    moderator_id: DbId,
) -> AppResult<axum::Json<DataResponse<campushub_db::models::roadmap::Roadmap>>> {
    let roadmap = RoadmapRepo::set_approval(&state.pool, id, approved)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "roadmap",
            id,
        }))?;

    tracing::info!(
        roadmap_id = id,
        approved,
        user_id = moderator_id,
        "Roadmap moderation decision",
    );

    Ok(Json(DataResponse { data: roadmap }))
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// GET /api/v1/admin/users?page=&limit= (admin only)
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let page = query.validate()?;

    let users = UserRepo::list(&state.pool, page.limit, page.offset()).await?;
    let total = UserRepo::count(&state.pool).await?;

    let rows: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(Json(Paginated {
        data: rows,
        pagination: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/admin/users (admin only)
///
/// Unlike self-registration, any role may be assigned here.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name: input.name.trim().to_string(),
        email: input.email.to_lowercase(),
        password_hash,
        role: input.role.as_str().to_string(),
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = user.id,
        role = %user.role,
        created_by = admin.user_id,
        "User created by admin",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// GET /api/v1/admin/users/{id} (admin only)
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/admin/users/{id} (admin only)
pub async fn update_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    // Role arrives as free text in the DTO; reject unknown values up front.
    if let Some(role) = &input.role {
        role.parse::<Role>()
            .map_err(|_| AppError::Core(CoreError::Validation(format!("unknown role '{role}'"))))?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "user", id }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// DELETE /api/v1/admin/users/{id} (admin only)
///
/// Admins cannot delete their own account.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "cannot delete your own account".into(),
        )));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "user", id }));
    }

    tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
