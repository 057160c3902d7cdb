//! Repository for the `favorites` table.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::favorite::Favorite;

const COLUMNS: &str = "id, user_id, listing_id, created_at";

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Favorite a listing for a user. Idempotent: refavoriting returns the
    /// existing row. The property's favorite counter is bumped only when a
    /// row is actually inserted.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        listing_id: DbId,
    ) -> Result<Favorite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO favorites (user_id, listing_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_favorites_user_listing DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Favorite>(&insert)
            .bind(user_id)
            .bind(listing_id)
            .fetch_optional(&mut *tx)
            .await?;

        let favorite = match inserted {
            Some(row) => {
                sqlx::query(
                    "UPDATE properties SET favorites_count = favorites_count + 1
                     WHERE id = (SELECT property_id FROM listings WHERE id = $1)",
                )
                .bind(listing_id)
                .execute(&mut *tx)
                .await?;
                row
            }
            None => {
                let select = format!(
                    "SELECT {COLUMNS} FROM favorites WHERE user_id = $1 AND listing_id = $2"
                );
                sqlx::query_as::<_, Favorite>(&select)
                    .bind(user_id)
                    .bind(listing_id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(favorite)
    }

    /// Remove a favorite. Returns `true` if a row was deleted.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        listing_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND listing_id = $2")
            .bind(user_id)
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            sqlx::query(
                "UPDATE properties SET favorites_count = GREATEST(favorites_count - 1, 0)
                 WHERE id = (SELECT property_id FROM listings WHERE id = $1)",
            )
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }

    /// List a user's favorites, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Favorite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM favorites
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Favorite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
