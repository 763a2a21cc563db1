//! Repository for the `subjects` table.

use sqlx::PgPool;

use campushub_core::types::DbId;

use crate::models::subject::{CreateSubject, Subject, SubjectFilter, UpdateSubject};

const COLUMNS: &str =
    "id, code, name, branch_id, semester_id, credits, topics, created_at, updated_at";

/// Shared WHERE clause for `list` and `count_listed`; both must see the same
/// filter so page totals stay correct.
const FILTER_WHERE: &str = "($1::BIGINT IS NULL OR branch_id = $1)
       AND ($2::BIGINT IS NULL OR semester_id = $2)
       AND ($3::TEXT IS NULL OR code ILIKE $3 OR name ILIKE $3)";

/// Provides CRUD and filtered listing for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    pub async fn create(pool: &PgPool, input: &CreateSubject) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (code, name, branch_id, semester_id, credits, topics)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.branch_id)
            .bind(input.semester_id)
            .bind(input.credits)
            .bind(&input.topics)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page of subjects matching the filter, ordered by code for
    /// deterministic pagination.
    pub async fn list(
        pool: &PgPool,
        filter: &SubjectFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subjects
             WHERE {FILTER_WHERE}
             ORDER BY code ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(filter.branch_id)
            .bind(filter.semester_id)
            .bind(&filter.name_like)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same filter as [`Self::list`].
    pub async fn count_listed(pool: &PgPool, filter: &SubjectFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM subjects WHERE {FILTER_WHERE}");
        sqlx::query_scalar(&query)
            .bind(filter.branch_id)
            .bind(filter.semester_id)
            .bind(&filter.name_like)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubject,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET
                name = COALESCE($2, name),
                credits = COALESCE($3, credits),
                topics = COALESCE($4, topics)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.credits)
            .bind(&input.topics)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of resources and roadmaps still referencing a subject. Used by
    /// the deletion guard.
    pub async fn count_dependents(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM resources WHERE subject_id = $1)
                  + (SELECT COUNT(*) FROM roadmaps WHERE subject_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM subjects")
            .fetch_one(pool)
            .await
    }
}
