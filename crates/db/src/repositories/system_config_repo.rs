//! Repository for the `system_configs` table.
//!
//! The single-active invariant is enforced on every write that sets
//! `is_active = true`: the other rows are deactivated in the same
//! transaction, so at most one row is active after any sequence of saves.
//! Like the original system, this is single-writer serialization, not a
//! guarantee under concurrent writers racing on different rows.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::system_config::{CreateSystemConfig, SystemConfig, UpdateSystemConfig};

const COLUMNS: &str = "id, name, version, is_active, settings, description, maintenance_mode, \
                        default_currency, max_upload_size_mb, created_at, updated_at";

pub struct SystemConfigRepo;

impl SystemConfigRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSystemConfig,
    ) -> Result<SystemConfig, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_active {
            sqlx::query("UPDATE system_configs SET is_active = false WHERE is_active = true")
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO system_configs (name, version, is_active, settings, description,
                                         maintenance_mode, default_currency, max_upload_size_mb)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let config = sqlx::query_as::<_, SystemConfig>(&query)
            .bind(&input.name)
            .bind(&input.version)
            .bind(input.is_active)
            .bind(&input.settings)
            .bind(&input.description)
            .bind(input.maintenance_mode)
            .bind(&input.default_currency)
            .bind(input.max_upload_size_mb)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(config)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SystemConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_configs WHERE id = $1");
        sqlx::query_as::<_, SystemConfig>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The currently active configuration, if any.
    pub async fn find_active(pool: &PgPool) -> Result<Option<SystemConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_configs WHERE is_active = true");
        sqlx::query_as::<_, SystemConfig>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SystemConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_configs ORDER BY version DESC");
        sqlx::query_as::<_, SystemConfig>(&query).fetch_all(pool).await
    }

    /// Update a configuration. Setting `is_active = true` deactivates every
    /// other row in the same transaction.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSystemConfig,
    ) -> Result<Option<SystemConfig>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_active == Some(true) {
            sqlx::query(
                "UPDATE system_configs SET is_active = false
                 WHERE is_active = true AND id <> $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE system_configs SET
                name = COALESCE($2, name),
                is_active = COALESCE($3, is_active),
                settings = COALESCE($4, settings),
                description = COALESCE($5, description),
                maintenance_mode = COALESCE($6, maintenance_mode),
                default_currency = COALESCE($7, default_currency),
                max_upload_size_mb = COALESCE($8, max_upload_size_mb),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let config = sqlx::query_as::<_, SystemConfig>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.is_active)
            .bind(&input.settings)
            .bind(&input.description)
            .bind(input.maintenance_mode)
            .bind(&input.default_currency)
            .bind(input.max_upload_size_mb)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(config)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM system_configs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
