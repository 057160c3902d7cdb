//! Repository for the `schools` and `property_schools` tables.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::school::{CreateSchool, PropertySchool, School};

const COLUMNS: &str = "id, name, school_type, latitude, longitude, rating";

pub struct SchoolRepo;

impl SchoolRepo {
    pub async fn create(pool: &PgPool, input: &CreateSchool) -> Result<School, sqlx::Error> {
        let query = format!(
            "INSERT INTO schools (name, school_type, latitude, longitude, rating)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, School>(&query)
            .bind(&input.name)
            .bind(&input.school_type)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<School>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schools WHERE id = $1");
        sqlx::query_as::<_, School>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<School>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schools ORDER BY name");
        sqlx::query_as::<_, School>(&query).fetch_all(pool).await
    }

    /// Link a school to a property with a precomputed distance.
    pub async fn link_to_property(
        pool: &PgPool,
        property_id: DbId,
        school_id: DbId,
        distance_meters: f64,
        walking_time_minutes: Option<i32>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO property_schools (property_id, school_id, distance_meters,
                                           walking_time_minutes)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_property_schools
             DO UPDATE SET distance_meters = $3, walking_time_minutes = $4",
        )
        .bind(property_id)
        .bind(school_id)
        .bind(distance_meters)
        .bind(walking_time_minutes)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Schools linked to a property, nearest first.
    pub async fn list_for_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<PropertySchool>, sqlx::Error> {
        sqlx::query_as::<_, PropertySchool>(
            "SELECT ps.id, s.id AS school_id, s.name, s.school_type, s.latitude, s.longitude,
                    ps.distance_meters, ps.walking_time_minutes
             FROM property_schools ps
             JOIN schools s ON s.id = ps.school_id
             WHERE ps.property_id = $1
             ORDER BY ps.distance_meters",
        )
        .bind(property_id)
        .fetch_all(pool)
        .await
    }
}
