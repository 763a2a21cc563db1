//! Repositories for the catalog hierarchy: branches, programs, years,
//! semesters. Subjects have their own module.

use sqlx::PgPool;

use campushub_core::types::DbId;

use crate::models::catalog::{
    Branch, CreateBranch, CreateProgram, CreateSemester, CreateYear, Program, Semester,
    UpdateBranch, UpdateProgram, Year,
};

const BRANCH_COLUMNS: &str = "id, code, name, created_at, updated_at";
const PROGRAM_COLUMNS: &str = "id, branch_id, code, name, duration_years, created_at, updated_at";

/// CRUD for the `branches` table.
pub struct BranchRepo;

impl BranchRepo {
    pub async fn create(pool: &PgPool, input: &CreateBranch) -> Result<Branch, sqlx::Error> {
        let query = format!(
            "INSERT INTO branches (code, name) VALUES ($1, $2) RETURNING {BRANCH_COLUMNS}"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!("SELECT {BRANCH_COLUMNS} FROM branches WHERE id = $1");
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all branches ordered by code for deterministic output.
    pub async fn list(pool: &PgPool) -> Result<Vec<Branch>, sqlx::Error> {
        let query = format!("SELECT {BRANCH_COLUMNS} FROM branches ORDER BY code ASC");
        sqlx::query_as::<_, Branch>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBranch,
    ) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!(
            "UPDATE branches SET
                code = COALESCE($2, code),
                name = COALESCE($3, name)
             WHERE id = $1
             RETURNING {BRANCH_COLUMNS}"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of programs and subjects still referencing a branch. Used by
    /// the deletion guard; the store itself has no cascade for these.
    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM programs WHERE branch_id = $1)
                  + (SELECT COUNT(*) FROM subjects WHERE branch_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM branches")
            .fetch_one(pool)
            .await
    }
}

/// CRUD for the `programs` table.
pub struct ProgramRepo;

impl ProgramRepo {
    pub async fn create(pool: &PgPool, input: &CreateProgram) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs (branch_id, code, name, duration_years)
             VALUES ($1, $2, $3, COALESCE($4, 4))
             RETURNING {PROGRAM_COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(input.branch_id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.duration_years)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List programs, optionally restricted to a branch.
    pub async fn list(pool: &PgPool, branch_id: Option<DbId>) -> Result<Vec<Program>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs
             WHERE ($1::BIGINT IS NULL OR branch_id = $1)
             ORDER BY code ASC"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(branch_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgram,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                duration_years = COALESCE($4, duration_years)
             WHERE id = $1
             RETURNING {PROGRAM_COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.duration_years)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Create/list access to the `years` table.
pub struct YearRepo;

impl YearRepo {
    pub async fn create(pool: &PgPool, input: &CreateYear) -> Result<Year, sqlx::Error> {
        sqlx::query_as::<_, Year>(
            "INSERT INTO years (program_id, year_number)
             VALUES ($1, $2)
             RETURNING id, program_id, year_number, created_at",
        )
        .bind(input.program_id)
        .bind(input.year_number)
        .fetch_one(pool)
        .await
    }

    /// List years, optionally restricted to a program.
    pub async fn list(pool: &PgPool, program_id: Option<DbId>) -> Result<Vec<Year>, sqlx::Error> {
        sqlx::query_as::<_, Year>(
            "SELECT id, program_id, year_number, created_at FROM years
             WHERE ($1::BIGINT IS NULL OR program_id = $1)
             ORDER BY year_number ASC",
        )
        .bind(program_id)
        .fetch_all(pool)
        .await
    }
}

/// Create/list access to the `semesters` table.
pub struct SemesterRepo;

impl SemesterRepo {
    pub async fn create(pool: &PgPool, input: &CreateSemester) -> Result<Semester, sqlx::Error> {
        sqlx::query_as::<_, Semester>(
            "INSERT INTO semesters (year_id, semester_number)
             VALUES ($1, $2)
             RETURNING id, year_id, semester_number, created_at",
        )
        .bind(input.year_id)
        .bind(input.semester_number)
        .fetch_one(pool)
        .await
    }

    /// List semesters, optionally restricted to a year.
    pub async fn list(pool: &PgPool, year_id: Option<DbId>) -> Result<Vec<Semester>, sqlx::Error> {
        sqlx::query_as::<_, Semester>(
            "SELECT id, year_id, semester_number, created_at FROM semesters
             WHERE ($1::BIGINT IS NULL OR year_id = $1)
             ORDER BY semester_number ASC",
        )
        .bind(year_id)
        .fetch_all(pool)
        .await
    }
}
