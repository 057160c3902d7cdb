//! Repository for the `ad_requests` table.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::ad_request::{AdRequest, CreateAdRequest};

const COLUMNS: &str = "id, requester_id, banner_id, context, status, served_at, created_at";

pub struct AdRequestRepo;

impl AdRequestRepo {
    pub async fn create(
        pool: &PgPool,
        requester_id: DbId,
        input: &CreateAdRequest,
    ) -> Result<AdRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO ad_requests (requester_id, context)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdRequest>(&query)
            .bind(requester_id)
            .bind(&input.context)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ad_requests WHERE id = $1");
        sqlx::query_as::<_, AdRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_requester(
        pool: &PgPool,
        requester_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ad_requests
             WHERE requester_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AdRequest>(&query)
            .bind(requester_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a pending request served with the chosen banner.
    pub async fn mark_served(
        pool: &PgPool,
        id: DbId,
        banner_id: DbId,
    ) -> Result<Option<AdRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE ad_requests SET banner_id = $2, status = 'served', served_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdRequest>(&query)
            .bind(id)
            .bind(banner_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a pending request rejected (no servable banner).
    pub async fn mark_rejected(pool: &PgPool, id: DbId) -> Result<Option<AdRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE ad_requests SET status = 'rejected'
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
