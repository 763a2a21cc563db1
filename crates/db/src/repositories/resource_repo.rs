//! Repository for the `resources` table: CRUD plus the filtered, paginated
//! listing/search that backs both the public and admin endpoints.

use sqlx::PgPool;

use campushub_core::types::DbId;

use crate::models::resource::{
    CreateResource, Resource, ResourceFilter, ResourceListRow, UpdateResource,
};

const COLUMNS: &str = "id, resource_type, title, url, description, provider, subject_id, \
     topics, tags, added_by, is_approved, quality_score, average_rating, total_ratings, \
     created_at, updated_at";

/// Projected listing columns: resource fields plus subject code/name and the
/// uploader's display name (read-time join).
const LIST_COLUMNS: &str = "r.id, r.resource_type, r.title, r.url, r.description, r.provider, \
     r.subject_id, s.code AS subject_code, s.name AS subject_name, r.tags, \
     r.added_by, u.name AS added_by_name, r.is_approved, r.quality_score, \
     r.average_rating, r.total_ratings, r.created_at";

/// Conjunctive WHERE clause shared by `list` and `count`. The bind order is
/// fixed: $1 type, $2 subject, $3 branch, $4 semester, $5 approved,
/// $6 tsquery. Branch/semester filters resolve through the subject join.
const FILTER_WHERE: &str = "($1::TEXT IS NULL OR r.resource_type = $1)
       AND ($2::BIGINT IS NULL OR r.subject_id = $2)
       AND ($3::BIGINT IS NULL OR s.branch_id = $3)
       AND ($4::BIGINT IS NULL OR s.semester_id = $4)
       AND ($5::BOOL IS NULL OR r.is_approved = $5)
       AND ($6::TEXT IS NULL OR r.search_tsv @@ to_tsquery('english', $6))";

/// Provides CRUD and filtered search for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    pub async fn create(pool: &PgPool, input: &CreateResource) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources
                (resource_type, title, url, description, provider, subject_id,
                 topics, tags, added_by, is_approved, quality_score)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(&input.resource_type)
            .bind(&input.title)
            .bind(&input.url)
            .bind(&input.description)
            .bind(&input.provider)
            .bind(input.subject_id)
            .bind(&input.topics)
            .bind(&input.tags)
            .bind(input.added_by)
            .bind(input.is_approved)
            .bind(input.quality_score)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page of resources matching the filter.
    ///
    /// With a tsquery present, rows are ordered by text relevance first
    /// (`ts_rank` over the weighted tsvector), then quality score, then
    /// recency. Without one, ordering falls back to creation time descending
    /// with `id` as a tiebreaker so pagination stays deterministic.
    pub async fn list(
        pool: &PgPool,
        filter: &ResourceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ResourceListRow>, sqlx::Error> {
        let order = if filter.tsquery.is_some() {
            "ts_rank(r.search_tsv, to_tsquery('english', $6)) DESC, \
             r.quality_score DESC, r.created_at DESC, r.id DESC"
        } else {
            "r.created_at DESC, r.id DESC"
        };
        let query = format!(
            "SELECT {LIST_COLUMNS}
             FROM resources r
             JOIN subjects s ON s.id = r.subject_id
             LEFT JOIN users u ON u.id = r.added_by
             WHERE {FILTER_WHERE}
             ORDER BY {order}
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, ResourceListRow>(&query)
            .bind(&filter.resource_type)
            .bind(filter.subject_id)
            .bind(filter.branch_id)
            .bind(filter.semester_id)
            .bind(filter.approved)
            .bind(&filter.tsquery)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows matching the same filter as [`Self::list`], so
    /// `pages = ceil(total / limit)` is correct even on a partial last page.
    pub async fn count(pool: &PgPool, filter: &ResourceFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*)
             FROM resources r
             JOIN subjects s ON s.id = r.subject_id
             WHERE {FILTER_WHERE}"
        );
        sqlx::query_scalar(&query)
            .bind(&filter.resource_type)
            .bind(filter.subject_id)
            .bind(filter.branch_id)
            .bind(filter.semester_id)
            .bind(filter.approved)
            .bind(&filter.tsquery)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResource,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources SET
                resource_type = COALESCE($2, resource_type),
                title = COALESCE($3, title),
                url = COALESCE($4, url),
                description = COALESCE($5, description),
                provider = COALESCE($6, provider),
                topics = COALESCE($7, topics),
                tags = COALESCE($8, tags),
                quality_score = COALESCE($9, quality_score)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(&input.resource_type)
            .bind(&input.title)
            .bind(&input.url)
            .bind(&input.description)
            .bind(&input.provider)
            .bind(&input.topics)
            .bind(&input.tags)
            .bind(input.quality_score)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
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
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources SET is_approved = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(approved)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM resources")
            .fetch_one(pool)
            .await
    }

    pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM resources WHERE is_approved = FALSE")
            .fetch_one(pool)
            .await
    }
}
