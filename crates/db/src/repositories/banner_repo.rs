//! Repository for the `banners` table.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::banner::{Banner, CreateBanner, UpdateBanner};

const COLUMNS: &str = "id, campaign_id, title, image_url, target_url, size, placement, status, \
                        impressions, clicks, created_at";

pub struct BannerRepo;

impl BannerRepo {
    pub async fn create(pool: &PgPool, input: &CreateBanner) -> Result<Banner, sqlx::Error> {
        let query = format!(
            "INSERT INTO banners (campaign_id, title, image_url, target_url, size, placement)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(input.campaign_id)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.target_url)
            .bind(&input.size)
            .bind(&input.placement)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM banners WHERE id = $1");
        sqlx::query_as::<_, Banner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Banner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM banners
             WHERE campaign_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// An active banner from an approved, running campaign with budget left,
    /// for serving against an ad request. Least-shown first so impressions
    /// spread across banners.
    pub async fn pick_servable(pool: &PgPool) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM banners b
             WHERE b.status = 'active'
               AND b.campaign_id IN (
                     SELECT c.id FROM ad_campaigns c
                     WHERE c.status = 'active'
                       AND c.approval_status = 'approved'
                       AND c.remaining_budget > 0)
             ORDER BY b.impressions
             LIMIT 1"
        );
        sqlx::query_as::<_, Banner>(&query).fetch_optional(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBanner,
    ) -> Result<Option<Banner>, sqlx::Error> {
        let query = format!(
            "UPDATE banners SET
                title = COALESCE($2, title),
                image_url = COALESCE($3, image_url),
                target_url = COALESCE($4, target_url),
                size = COALESCE($5, size),
                placement = COALESCE($6, placement),
                status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.image_url)
            .bind(&input.target_url)
            .bind(&input.size)
            .bind(&input.placement)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Increment the impression counter.
    pub async fn record_impression(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE banners SET impressions = impressions + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Increment the click counter.
    pub async fn record_click(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE banners SET clicks = clicks + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
