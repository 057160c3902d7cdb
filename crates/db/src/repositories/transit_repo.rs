//! Repository for the `transits` and `property_transits` tables.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::transit::{CreateTransit, PropertyTransit, Transit};

const COLUMNS: &str = "id, name, transit_type, latitude, longitude, operator";

pub struct TransitRepo;

impl TransitRepo {
    pub async fn create(pool: &PgPool, input: &CreateTransit) -> Result<Transit, sqlx::Error> {
        let query = format!(
            "INSERT INTO transits (name, transit_type, latitude, longitude, operator)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transit>(&query)
            .bind(&input.name)
            .bind(&input.transit_type)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.operator)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transits WHERE id = $1");
        sqlx::query_as::<_, Transit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Transit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transits ORDER BY name");
        sqlx::query_as::<_, Transit>(&query).fetch_all(pool).await
    }

    /// Link a transit stop to a property with a precomputed distance.
    pub async fn link_to_property(
        pool: &PgPool,
        property_id: DbId,
        transit_id: DbId,
        distance_meters: f64,
        walking_time_minutes: Option<i32>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO property_transits (property_id, transit_id, distance_meters,
                                            walking_time_minutes)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_property_transits
             DO UPDATE SET distance_meters = $3, walking_time_minutes = $4",
        )
        .bind(property_id)
        .bind(transit_id)
        .bind(distance_meters)
        .bind(walking_time_minutes)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Transit stops linked to a property, nearest first.
    pub async fn list_for_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<PropertyTransit>, sqlx::Error> {
        sqlx::query_as::<_, PropertyTransit>(
            "SELECT pt.id, t.id AS transit_id, t.name, t.transit_type, t.latitude, t.longitude,
                    pt.distance_meters, pt.walking_time_minutes
             FROM property_transits pt
             JOIN transits t ON t.id = pt.transit_id
             WHERE pt.property_id = $1
             ORDER BY pt.distance_meters",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await
    }
}
