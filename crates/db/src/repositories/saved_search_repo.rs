//! Repository for the `saved_searches` table.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::saved_search::{CreateSavedSearch, SavedSearch, UpdateSavedSearch};

const COLUMNS: &str = "id, user_id, name, criteria, search_area, notify_on_match, is_active, \
                        created_at, updated_at";

pub struct SavedSearchRepo;

impl SavedSearchRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSavedSearch,
    ) -> Result<SavedSearch, sqlx::Error> {
        let query = format!(
            "INSERT INTO saved_searches (user_id, name, criteria, search_area, notify_on_match)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedSearch>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.criteria)
            .bind(&input.search_area)
            .bind(input.notify_on_match)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SavedSearch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM saved_searches WHERE id = $1");
        sqlx::query_as::<_, SavedSearch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's searches, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SavedSearch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM saved_searches
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SavedSearch>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSavedSearch,
    ) -> Result<Option<SavedSearch>, sqlx::Error> {
        let query = format!(
            "UPDATE saved_searches SET
                name = COALESCE($2, name),
                criteria = COALESCE($3, criteria),
                search_area = COALESCE($4, search_area),
                notify_on_match = COALESCE($5, notify_on_match),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SavedSearch>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.criteria)
            .bind(&input.search_area)
            .bind(input.notify_on_match)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_searches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
