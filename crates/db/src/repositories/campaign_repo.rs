//! Repository for the `ad_campaigns` table.

use homegrid_core::campaign::remaining_budget;
use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{AdCampaign, CreateCampaign, UpdateCampaign};

const COLUMNS: &str = "id, user_id, name, description, status, approval_status, \
                        rejection_reason, start_date, end_date, budget, bid_strategy, \
                        bid_amount, target_audience, target_locations, target_devices, \
                        total_spent, remaining_budget, created_at, updated_at";

pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign. `remaining_budget` starts at the full budget
    /// since nothing has been spent.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCampaign,
    ) -> Result<AdCampaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO ad_campaigns (user_id, name, description, start_date, end_date, budget,
                                       bid_strategy, bid_amount, target_audience,
                                       target_locations, target_devices, remaining_budget)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdCampaign>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(&input.bid_strategy)
            .bind(input.bid_amount)
            .bind(&input.target_audience)
            .bind(&input.target_locations)
            .bind(&input.target_devices)
            .bind(remaining_budget(input.budget, 0.0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdCampaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ad_campaigns WHERE id = $1");
        sqlx::query_as::<_, AdCampaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one user's campaigns, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdCampaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ad_campaigns
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AdCampaign>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List campaigns awaiting review, oldest first.
    pub async fn list_pending_approval(pool: &PgPool) -> Result<Vec<AdCampaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ad_campaigns
             WHERE approval_status = 'pending' AND status = 'pending'
             ORDER BY created_at"
        );
        sqlx::query_as::<_, AdCampaign>(&query).fetch_all(pool).await
    }

    /// Update a campaign. `remaining_budget` is recomputed from the
    /// effective budget and spend inside one transaction so the stored value
    /// always equals `budget - total_spent` after the write.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<AdCampaign>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM ad_campaigns WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, AdCampaign>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let budget = input.budget.unwrap_or(current.budget);
        let total_spent = input.total_spent.unwrap_or(current.total_spent);

        let update = format!(
            "UPDATE ad_campaigns SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                budget = $7,
                bid_strategy = COALESCE($8, bid_strategy),
                bid_amount = COALESCE($9, bid_amount),
                target_audience = COALESCE($10, target_audience),
                target_locations = COALESCE($11, target_locations),
                target_devices = COALESCE($12, target_devices),
                total_spent = $13,
                remaining_budget = $14,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, AdCampaign>(&update)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(budget)
            .bind(&input.bid_strategy)
            .bind(input.bid_amount)
            .bind(&input.target_audience)
            .bind(&input.target_locations)
            .bind(&input.target_devices)
            .bind(total_spent)
            .bind(remaining_budget(budget, total_spent))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Record a review decision. Approval also moves a pending campaign to
    /// `active`; rejection moves it to `rejected` with the given reason.
    pub async fn set_approval(
        pool: &PgPool,
        id: DbId,
        approved: bool,
        rejection_reason: Option<&str>,
    ) -> Result<Option<AdCampaign>, sqlx::Error> {
        let query = format!(
            "UPDATE ad_campaigns SET
                approval_status = $2,
                status = $3,
                rejection_reason = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let (approval, status) = if approved {
            ("approved", "active")
        } else {
            ("rejected", "rejected")
        };
        sqlx::query_as::<_, AdCampaign>(&query)
            .bind(id)
            .bind(approval)
            .bind(status)
            .bind(rejection_reason)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ad_campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
