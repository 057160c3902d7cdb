//! Repository for the `open_houses` table.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::open_house::{CreateOpenHouse, OpenHouse};

const COLUMNS: &str = "id, listing_id, start_time, end_time, registration_required, \
                        attendees_count, rsvp_deadline";

pub struct OpenHouseRepo;

impl OpenHouseRepo {
    pub async fn create(
        pool: &PgPool,
        listing_id: DbId,
        input: &CreateOpenHouse,
    ) -> Result<OpenHouse, sqlx::Error> {
        let query = format!(
            "INSERT INTO open_houses (listing_id, start_time, end_time, registration_required,
                                      rsvp_deadline)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OpenHouse>(&query)
            .bind(listing_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.registration_required)
            .bind(input.rsvp_deadline)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OpenHouse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM open_houses WHERE id = $1");
        sqlx::query_as::<_, OpenHouse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Upcoming-first list for a listing.
    pub async fn list_by_listing(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Vec<OpenHouse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM open_houses
             WHERE listing_id = $1
             ORDER BY start_time"
        );
        sqlx::query_as::<_, OpenHouse>(&query)
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }

    /// Record an RSVP by bumping the attendee counter, refusing past-deadline
    /// RSVPs in the same statement. Returns the updated row, or `None` when
    /// the open house does not exist or the deadline has passed.
    pub async fn rsvp(pool: &PgPool, id: DbId) -> Result<Option<OpenHouse>, sqlx::Error> {
        let query = format!(
            "UPDATE open_houses SET attendees_count = attendees_count + 1
             WHERE id = $1
               AND (rsvp_deadline IS NULL OR rsvp_deadline > NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OpenHouse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM open_houses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
