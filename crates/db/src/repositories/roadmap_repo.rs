//! Repository for roadmaps and their embedded steps.
//!
//! Steps are written in the same transaction as the header row so
//! `total_estimated_hours` and the steps array can never drift apart.
//! `step_order` is assigned densely from array position (1-based).

use sqlx::{PgPool, Postgres, Transaction};

use campushub_core::roadmap::{total_estimated_hours, StepInput};
use campushub_core::types::DbId;

use crate::models::roadmap::{
    CreateRoadmap, Roadmap, RoadmapDetail, RoadmapFilter, RoadmapStep, StepWithResources,
    UpdateRoadmap,
};

const COLUMNS: &str = "id, subject_id, roadmap_type, title, description, difficulty, \
     total_estimated_hours, created_by, is_public, is_approved, tags, created_at, updated_at";

const STEP_COLUMNS: &str =
    "id, roadmap_id, step_order, title, description, estimated_hours, prerequisites";

/// Shared WHERE clause for `list` / `count_listed`. Bind order: $1 subject,
/// $2 difficulty, $3 title pattern, $4 public_only, $5 approved.
const FILTER_WHERE: &str = "($1::BIGINT IS NULL OR subject_id = $1)
       AND ($2::TEXT IS NULL OR difficulty = $2)
       AND ($3::TEXT IS NULL OR title ILIKE $3 OR description ILIKE $3)
       AND (NOT $4::BOOL OR (is_public AND is_approved))
       AND ($5::BOOL IS NULL OR is_approved = $5)";

/// Provides CRUD for roadmaps with embedded steps.
pub struct RoadmapRepo;

impl RoadmapRepo {
    /// Create a roadmap and its steps atomically. The caller validates the
    /// steps; the derived hours total is computed here from the same array
    /// that gets persisted.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRoadmap,
        steps: &[StepInput],
    ) -> Result<Roadmap, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO roadmaps
                (subject_id, roadmap_type, title, description, difficulty,
                 total_estimated_hours, created_by, is_public, is_approved, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        let roadmap = sqlx::query_as::<_, Roadmap>(&query)
            .bind(input.subject_id)
            .bind(&input.roadmap_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.difficulty)
            .bind(total_estimated_hours(steps))
            .bind(input.created_by)
            .bind(input.is_public)
            .bind(input.is_approved)
            .bind(&input.tags)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_steps(&mut tx, roadmap.id, steps).await?;

        tx.commit().await?;
        Ok(roadmap)
    }

    /// Update a roadmap header. When `steps` is supplied the old steps are
    /// replaced wholesale and `total_estimated_hours` recomputed in the same
    /// transaction; when absent, steps and total are left untouched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoadmap,
        steps: Option<&[StepInput]>,
    ) -> Result<Option<Roadmap>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE roadmaps SET
                roadmap_type = COALESCE($2, roadmap_type),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                difficulty = COALESCE($5, difficulty),
                is_public = COALESCE($6, is_public),
                tags = COALESCE($7, tags),
                total_estimated_hours = COALESCE($8, total_estimated_hours)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let roadmap = sqlx::query_as::<_, Roadmap>(&query)
            .bind(id)
            .bind(&input.roadmap_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.difficulty)
            .bind(input.is_public)
            .bind(&input.tags)
            .bind(steps.map(total_estimated_hours))
            .fetch_optional(&mut *tx)
            .await?;

        let Some(roadmap) = roadmap else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(steps) = steps {
            // Cascade clears roadmap_step_resources with the steps.
            sqlx::query("DELETE FROM roadmap_steps WHERE roadmap_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_steps(&mut tx, id, steps).await?;
        }

        tx.commit().await?;
        Ok(Some(roadmap))
    }

    async fn insert_steps(
        tx: &mut Transaction<'_, Postgres>,
        roadmap_id: DbId,
        steps: &[StepInput],
    ) -> Result<(), sqlx::Error> {
        for (idx, step) in steps.iter().enumerate() {
            let step_id: DbId = sqlx::query_scalar(
                "INSERT INTO roadmap_steps
                    (roadmap_id, step_order, title, description, estimated_hours, prerequisites)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id",
            )
            .bind(roadmap_id)
            .bind(idx as i32 + 1)
            .bind(&step.title)
            .bind(&step.description)
            .bind(step.estimated_hours)
            .bind(&step.prerequisites)
            .fetch_one(&mut **tx)
            .await?;

            for resource_id in &step.resource_ids {
                sqlx::query(
                    "INSERT INTO roadmap_step_resources (step_id, resource_id) VALUES ($1, $2)",
                )
                .bind(step_id)
                .bind(resource_id)
                .execute(&mut **tx)
                .await?;
            }
        }
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Roadmap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roadmaps WHERE id = $1");
        sqlx::query_as::<_, Roadmap>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a roadmap with its ordered steps and each step's resource refs.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<RoadmapDetail>, sqlx::Error> {
        let Some(roadmap) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {STEP_COLUMNS} FROM roadmap_steps
             WHERE roadmap_id = $1
             ORDER BY step_order ASC"
        );
        let steps = sqlx::query_as::<_, RoadmapStep>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        let refs: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT sr.step_id, sr.resource_id
             FROM roadmap_step_resources sr
             JOIN roadmap_steps st ON st.id = sr.step_id
             WHERE st.roadmap_id = $1
             ORDER BY sr.resource_id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let steps = steps
            .into_iter()
            .map(|step| {
                let resource_ids = refs
                    .iter()
                    .filter(|(step_id, _)| *step_id == step.id)
                    .map(|(_, resource_id)| *resource_id)
                    .collect();
                StepWithResources { step, resource_ids }
            })
            .collect();

        Ok(Some(RoadmapDetail { roadmap, steps }))
    }

    /// Page of roadmaps matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RoadmapFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Roadmap>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM roadmaps
             WHERE {FILTER_WHERE}
             ORDER BY created_at DESC, id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Roadmap>(&query)
            .bind(filter.subject_id)
            .bind(&filter.difficulty)
            .bind(&filter.title_like)
            .bind(filter.public_only)
            .bind(filter.approved)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same filter as [`Self::list`].
    pub async fn count_listed(pool: &PgPool, filter: &RoadmapFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM roadmaps WHERE {FILTER_WHERE}");
        sqlx::query_scalar(&query)
            .bind(filter.subject_id)
            .bind(&filter.difficulty)
            .bind(&filter.title_like)
            .bind(filter.public_only)
            .bind(filter.approved)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roadmaps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip the approval flag. Returns the updated row, `None` if absent.
    pub async fn set_approval(
        pool: &PgPool,
        id: DbId,
        approved: bool,
    ) -> Result<Option<Roadmap>, sqlx::Error> {
        let query =
            format!("UPDATE roadmaps SET is_approved = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Roadmap>(&query)
            .bind(id)
            .bind(approved)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM roadmaps")
            .fetch_one(pool)
            .await
    }

    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM roadmaps WHERE is_approved = FALSE")
            .fetch_one(pool)
            .await
    }
}
