//! Repository for the `resource_ratings` table.
//!
//! Every rating write recomputes the denormalized
//! `average_rating`/`total_ratings` cache on the resource inside the same
//! transaction, so the aggregate can never drift from the live ratings.

use sqlx::{PgPool, Postgres, Transaction};

use campushub_core::types::DbId;

use crate::models::rating::{RatingListRow, ResourceRating, UpsertRating};

const COLUMNS: &str = "id, resource_id, user_id, rating, review, helpful_votes, is_verified, \
     created_at, updated_at";

/// Provides rating CRUD with transactional aggregate maintenance.
pub struct RatingRepo;

impl RatingRepo {
    /// Create or replace the caller's rating for a resource, then recompute
    /// the resource's aggregate in the same transaction.
    pub async fn upsert(
        pool: &PgPool,
        resource_id: DbId,
        user_id: DbId,
        input: &UpsertRating,
    ) -> Result<ResourceRating, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO resource_ratings (resource_id, user_id, rating, review)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (resource_id, user_id) DO UPDATE
             SET rating = EXCLUDED.rating,
                 review = EXCLUDED.review
             RETURNING {COLUMNS}"
        );
        let rating = sqlx::query_as::<_, ResourceRating>(&query)
            .bind(resource_id)
            .bind(user_id)
            .bind(input.rating)
            .bind(&input.review)
            .fetch_one(&mut *tx)
            .await?;

        Self::recompute_aggregate(&mut tx, resource_id).await?;

        tx.commit().await?;
        Ok(rating)
    }

    /// Remove the caller's rating, recomputing the aggregate. Returns whether
    /// a rating existed.
    pub async fn delete(
        pool: &PgPool,
        resource_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result =
            sqlx::query("DELETE FROM resource_ratings WHERE resource_id = $1 AND user_id = $2")
                .bind(resource_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        Self::recompute_aggregate(&mut tx, resource_id).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Rewrite the denormalized aggregate from the live ratings.
    async fn recompute_aggregate(
        tx: &mut Transaction<'_, Postgres>,
        resource_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE resources SET
                average_rating = COALESCE(
                    (SELECT AVG(rating)::DOUBLE PRECISION FROM resource_ratings
                     WHERE resource_id = $1), 0),
                total_ratings =
                    (SELECT COUNT(*) FROM resource_ratings WHERE resource_id = $1)
             WHERE id = $1",
        )
        .bind(resource_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }


    /// Page of a resource's ratings with rater names, newest first.
    pub async fn list_for_resource(
        pool: &PgPool,
        resource_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RatingListRow>, sqlx::Error> {
        sqlx::query_as::<_, RatingListRow>(
            "SELECT rr.id, rr.user_id, u.name AS user_name, rr.rating, rr.review,
                    rr.helpful_votes, rr.is_verified, rr.created_at
             FROM resource_ratings rr
             JOIN users u ON u.id = rr.user_id
             WHERE rr.resource_id = $1
             ORDER BY rr.created_at DESC, rr.id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(resource_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total ratings for a resource (matches `list_for_resource`).
    pub async fn count_for_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM resource_ratings WHERE resource_id = $1")
            .bind(resource_id)
            .fetch_one(pool)
            .await
    }

    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM resource_ratings")
            .fetch_one(pool)
            .await
    }
}
