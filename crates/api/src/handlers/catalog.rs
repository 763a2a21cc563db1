//! Handlers for the catalog hierarchy: branches, programs, years, semesters.
//!
//! Reads are public; writes are admin-only. Branch deletion is guarded by a
//! dependent-count check since programs and subjects do not cascade.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campushub_core::catalog::{validate_code, validate_name};
use campushub_core::error::CoreError;
use campushub_core::types::DbId;
use campushub_db::models::catalog::{
    CreateBranch, CreateProgram, CreateSemester, CreateYear, UpdateBranch, UpdateProgram,
};
use campushub_db::repositories::{BranchRepo, ProgramRepo, SemesterRepo, YearRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// GET /api/v1/branches
pub async fn list_branches(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let branches = BranchRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: branches }))
}

/// POST /api/v1/branches (admin only)
pub async fn create_branch(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBranch>,
) -> AppResult<impl IntoResponse> {
    validate_code(&input.code)?;
    validate_name(&input.name)?;

    let branch = BranchRepo::create(&state.pool, &input).await?;

    tracing::info!(
        branch_id = branch.id,
        code = %branch.code,
        user_id = admin.user_id,
        "Branch created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: branch })))
}

/// GET /api/v1/branches/{id}
pub async fn get_branch(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let branch = BranchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "branch",
            id,
        }))?;
    Ok(Json(DataResponse { data: branch }))
}

/// PUT /api/v1/branches/{id} (admin only)
pub async fn update_branch(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBranch>,
) -> AppResult<impl IntoResponse> {
    if let Some(code) = &input.code {
        validate_code(code)?;
    }
    if let Some(name) = &input.name {
        validate_name(name)?;
    }

    let branch = BranchRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "branch",
            id,
        }))?;
    Ok(Json(DataResponse { data: branch }))
}

/// DELETE /api/v1/branches/{id} (admin only)
///
/// Rejected with 400 while dependent programs or subjects exist.
pub async fn delete_branch(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let dependents = BranchRepo::count_dependents(&state.pool, id).await?;
    if dependents > 0 {
        return Err(AppError::Core(CoreError::DependentChildren {
            entity: "branch",
            dependent: "programs or subjects",
            count: dependents,
        }));
    }

    let deleted = BranchRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "branch",
            id,
        }));
    }

    tracing::info!(branch_id = id, user_id = admin.user_id, "Branch deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /programs`.
#[derive(Debug, Deserialize)]
pub struct ProgramQuery {
    /// Restrict to programs of one branch.
    pub branch: Option<DbId>,
}

/// GET /api/v1/programs?branch=
pub async fn list_programs(
    State(state): State<AppState>,
    Query(query): Query<ProgramQuery>,
) -> AppResult<impl IntoResponse> {
    let programs = ProgramRepo::list(&state.pool, query.branch).await?;
    Ok(Json(DataResponse { data: programs }))
}

/// POST /api/v1/programs (admin only)
pub async fn create_program(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProgram>,
) -> AppResult<impl IntoResponse> {
    validate_code(&input.code)?;
    validate_name(&input.name)?;

    let program = ProgramRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: program })))
}

/// GET /api/v1/programs/{id}
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let program = ProgramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "program",
            id,
        }))?;
    Ok(Json(DataResponse { data: program }))
}

/// PUT /api/v1/programs/{id} (admin only)
pub async fn update_program(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgram>,
) -> AppResult<impl IntoResponse> {
    if let Some(code) = &input.code {
        validate_code(code)?;
    }
    if let Some(name) = &input.name {
        validate_name(name)?;
    }

    let program = ProgramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "program",
            id,
        }))?;
    Ok(Json(DataResponse { data: program }))
}

/// DELETE /api/v1/programs/{id} (admin only)
pub async fn delete_program(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProgramRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "program",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Years & semesters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /years`.
#[derive(Debug, Deserialize)]
pub struct YearQuery {
    /// Restrict to years of one program.
    pub program: Option<DbId>,
}

/// GET /api/v1/years?program=
pub async fn list_years(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> AppResult<impl IntoResponse> {
    let years = YearRepo::list(&state.pool, query.program).await?;
    Ok(Json(DataResponse { data: years }))
}

/// POST /api/v1/years (admin only)
pub async fn create_year(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateYear>,
) -> AppResult<impl IntoResponse> {
    if !(1..=6).contains(&input.year_number) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "year_number must be between 1 and 6, got {}",
            input.year_number
        ))));
    }

    let year = YearRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: year })))
}

/// Query parameters for `GET /semesters`.
#[derive(Debug, Deserialize)]
pub struct SemesterQuery {
    /// Restrict to semesters of one year.
    pub year: Option<DbId>,
}

/// GET /api/v1/semesters?year=
pub async fn list_semesters(
    State(state): State<AppState>,
    Query(query): Query<SemesterQuery>,
) -> AppResult<impl IntoResponse> {
    let semesters = SemesterRepo::list(&state.pool, query.year).await?;
    Ok(Json(DataResponse { data: semesters }))
}

/// POST /api/v1/semesters (admin only)
pub async fn create_semester(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSemester>,
) -> AppResult<impl IntoResponse> {
    if !(1..=12).contains(&input.semester_number) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "semester_number must be between 1 and 12, got {}",
            input.semester_number
        ))));
    }

    let semester = SemesterRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: semester })))
}
