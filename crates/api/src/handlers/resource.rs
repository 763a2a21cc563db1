//! Handlers for the `/resources` resource: listing/search, submission, and
//! owner-gated mutation.
//!
//! The public listing is always restricted to approved rows; moderation
//! happens through the admin endpoints. Submissions from moderators and
//! admins are approved immediately, everyone else's start pending.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campushub_core::catalog::{
    validate_name, validate_quality_score, validate_resource_type, validate_url,
};
use campushub_core::error::CoreError;
use campushub_core::pagination::{Page, PageMeta};
use campushub_core::search::build_tsquery;
use campushub_core::types::DbId;
use campushub_db::models::resource::{CreateResource, Resource, ResourceFilter, UpdateResource};
use campushub_db::repositories::ResourceRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /resources`.
#[derive(Debug, Deserialize)]
pub struct ResourceListQuery {
    /// Free-text search over title, description, and tags.
    pub q: Option<String>,
    /// Resource type filter (`syllabus`, `lecture`, `notes`, `book`).
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub subject: Option<DbId>,
    pub branch: Option<DbId>,
    pub semester: Option<DbId>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ResourceListQuery {
    /// Turn validated query parameters into a repository filter.
    ///
    /// `approved` is supplied by the caller: the public listing pins it to
    /// `Some(true)`, the admin listing passes its explicit filter through.
    fn into_filter(self, approved: Option<bool>) -> AppResult<(ResourceFilter, Page)> {
        let page = Page::from_params(self.page, self.limit)?;

        if let Some(resource_type) = &self.resource_type {
            validate_resource_type(resource_type)?;
        }

        // A present-but-unusable q (whitespace or only punctuation) is an
        // input error, not an empty result.
        let tsquery = match &self.q {
            None => None,
            Some(q) => Some(build_tsquery(q).ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "search text must contain at least one word".into(),
                ))
            })?),
        };

        Ok((
            ResourceFilter {
                resource_type: self.resource_type,
                subject_id: self.subject,
                branch_id: self.branch,
                semester_id: self.semester,
                approved,
                tsquery,
            },
            page,
        ))
    }
}

/// Request body for `POST /resources`.
#[derive(Debug, Deserialize)]
pub struct CreateResourceRequest {
    pub resource_type: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub provider: Option<String>,
    pub subject_id: DbId,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub quality_score: Option<i32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/resources?q=&type=&subject=&branch=&semester=&page=&limit=
///
/// Public paginated listing/search, always restricted to approved resources.
/// With `q`, results order by text-match rank, then quality score; without it,
/// newest first.
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceListQuery>,
) -> AppResult<impl IntoResponse> {
    let (filter, page) = query.into_filter(Some(true))?;

    let rows = ResourceRepo::list(&state.pool, &filter, page.limit, page.offset()).await?;
    let total = ResourceRepo::count(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: rows,
        pagination: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/resources (auth required)
///
/// Submit a new resource. Starts unapproved unless the submitter can moderate.
pub async fn create_resource(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateResourceRequest>,
) -> AppResult<impl IntoResponse> {
    validate_resource_type(&input.resource_type)?;
    validate_name(&input.title)?;
    validate_url(&input.url)?;
    // Only moderators set a quality score; other submissions start at 0 and
    // get scored during review.
    let quality_score = if auth_user.role.can_moderate() {
        input.quality_score.unwrap_or(0)
    } else {
        0
    };
    validate_quality_score(quality_score)?;

    let create = CreateResource {
        resource_type: input.resource_type,
        title: input.title,
        url: input.url,
        description: input.description,
        provider: input.provider,
        subject_id: input.subject_id,
        topics: input.topics,
        tags: input.tags,
        added_by: Some(auth_user.user_id),
        is_approved: auth_user.role.can_moderate(),
        quality_score,
    };
    let resource = ResourceRepo::create(&state.pool, &create).await?;

    tracing::info!(
        resource_id = resource.id,
        subject_id = resource.subject_id,
        approved = resource.is_approved,
        user_id = auth_user.user_id,
        "Resource submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: resource })))
}

/// GET /api/v1/resources/{id}
///
/// Unapproved resources are visible to their owner and moderators only;
/// everyone else gets a 404, indistinguishable from a missing row.
pub async fn get_resource(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }))?;

    if !resource.is_approved && !can_view_pending(viewer, &resource) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }));
    }

    Ok(Json(DataResponse { data: resource }))
}

/// PUT /api/v1/resources/{id} (owner or admin)
pub async fn update_resource(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateResource>,
) -> AppResult<impl IntoResponse> {
    let resource = find_owned(&state, id, auth_user).await?;

    // Quality scoring is a moderation concern; owners cannot raise their own.
    if !auth_user.role.can_moderate() {
        input.quality_score = None;
    }

    if let Some(resource_type) = &input.resource_type {
        validate_resource_type(resource_type)?;
    }
    if let Some(title) = &input.title {
        validate_name(title)?;
    }
    if let Some(url) = &input.url {
        validate_url(url)?;
    }
    if let Some(score) = input.quality_score {
        validate_quality_score(score)?;
    }

    let updated = ResourceRepo::update(&state.pool, resource.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/resources/{id} (owner or admin)
pub async fn delete_resource(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let resource = find_owned(&state, id, auth_user).await?;

    ResourceRepo::delete(&state.pool, resource.id).await?;

    tracing::info!(resource_id = id, user_id = auth_user.user_id, "Resource deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn can_view_pending(viewer: Option<AuthUser>, resource: &Resource) -> bool {
    match viewer {
        Some(user) => user.role.can_moderate() || resource.added_by == Some(user.user_id),
        None => false,
    }
}

/// Fetch a resource and check the principal may mutate it (owner or admin).
async fn find_owned(state: &AppState, id: DbId, auth_user: AuthUser) -> AppResult<Resource> {
    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }))?;

    if !auth_user
        .role
        .can_mutate_owned(auth_user.user_id, resource.added_by)
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner or an admin may modify this resource".into(),
        )));
    }

    Ok(resource)
}
