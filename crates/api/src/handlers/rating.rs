//! Handlers for resource ratings.
//!
//! One rating per (resource, user); `PUT` upserts, `DELETE` removes the
//! caller's own rating. Both recompute the resource's denormalized aggregate
//! inside the repository transaction.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campushub_core::error::CoreError;
use campushub_core::pagination::PageMeta;
use campushub_core::rating::validate_rating;
use campushub_core::types::DbId;
use campushub_db::models::rating::UpsertRating;
use campushub_db::repositories::{RatingRepo, ResourceRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::PageQuery;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// PUT /api/v1/resources/{id}/rating (auth required)
///
/// Create or replace the caller's rating (1-5) for a resource.
pub async fn rate_resource(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpsertRating>,
) -> AppResult<impl IntoResponse> {
    validate_rating(input.rating)?;
    ensure_ratable(&state, id, auth_user).await?;

    let rating = RatingRepo::upsert(&state.pool, id, auth_user.user_id, &input).await?;

    tracing::info!(
        resource_id = id,
        user_id = auth_user.user_id,
        rating = rating.rating,
        "Resource rated",
    );

    Ok(Json(DataResponse { data: rating }))
}

/// GET /api/v1/resources/{id}/ratings?page=&limit=
pub async fn list_ratings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let page = query.validate()?;

    if ResourceRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }));
    }

    let rows = RatingRepo::list_for_resource(&state.pool, id, page.limit, page.offset()).await?;
    let total = RatingRepo::count_for_resource(&state.pool, id).await?;

    Ok(Json(Paginated {
        data: rows,
        pagination: PageMeta::new(page, total),
    }))
}

/// DELETE /api/v1/resources/{id}/rating (auth required)
///
/// Remove the caller's own rating and recompute the aggregate.
pub async fn delete_rating(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = RatingRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if !removed {
        // The path id names the resource, not the rating row.
        return Err(AppError::Core(CoreError::NotFound {
            entity: "rating for resource",
            id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Rating targets follow the same visibility rule as the detail endpoint:
/// pending resources exist only for their owner and moderators.
async fn ensure_ratable(state: &AppState, id: DbId, auth_user: AuthUser) -> AppResult<()> {
    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }))?;

    if !resource.is_approved
        && !auth_user.role.can_moderate()
        && resource.added_by != Some(auth_user.user_id)
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "resource",
            id,
        }));
    }

    Ok(())
}
