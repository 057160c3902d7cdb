//! Repository for the `properties` and `addresses` tables.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::property::{
    Address, CreateProperty, Property, PropertyFilter, UpdateProperty,
};

const COLUMNS: &str = "id, building_name, property_type, status, address_id, owner_id, \
                        total_units, year_built, floors, views_count, favorites_count, \
                        created_at, updated_at";

const ADDRESS_COLUMNS: &str = "id, street_address, unit_number, city, state, postal_code, \
                                neighborhood, borough, latitude, longitude, walk_score, \
                                transit_score";

pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a property together with its address in one transaction.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProperty,
    ) -> Result<Property, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let address_query = format!(
            "INSERT INTO addresses (street_address, unit_number, city, state, postal_code,
                                    neighborhood, borough, latitude, longitude, walk_score,
                                    transit_score)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {ADDRESS_COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&address_query)
            .bind(&input.address.street_address)
            .bind(&input.address.unit_number)
            .bind(&input.address.city)
            .bind(&input.address.state)
            .bind(&input.address.postal_code)
            .bind(&input.address.neighborhood)
            .bind(&input.address.borough)
            .bind(input.address.latitude)
            .bind(input.address.longitude)
            .bind(input.address.walk_score)
            .bind(input.address.transit_score)
            .fetch_one(&mut *tx)
            .await?;

        let property_query = format!(
            "INSERT INTO properties (building_name, property_type, address_id, owner_id,
                                     total_units, year_built, floors)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let property = sqlx::query_as::<_, Property>(&property_query)
            .bind(&input.building_name)
            .bind(&input.property_type)
            .bind(address.id)
            .bind(owner_id)
            .bind(input.total_units.unwrap_or(1))
            .bind(input.year_built)
            .bind(input.floors.unwrap_or(1))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(property)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_address(
        pool: &PgPool,
        address_id: DbId,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1");
        sqlx::query_as::<_, Address>(&query)
            .bind(address_id)
            .fetch_optional(pool)
            .await
    }

    /// List properties with optional filters applied only when present.
    pub async fn list(
        pool: &PgPool,
        filter: &PropertyFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE ($1::text IS NULL OR property_type = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::int IS NULL OR total_units >= $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(&filter.property_type)
            .bind(&filter.status)
            .bind(filter.min_units)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                building_name = COALESCE($2, building_name),
                property_type = COALESCE($3, property_type),
                status = COALESCE($4, status),
                total_units = COALESCE($5, total_units),
                year_built = COALESCE($6, year_built),
                floors = COALESCE($7, floors),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(&input.building_name)
            .bind(&input.property_type)
            .bind(&input.status)
            .bind(input.total_units)
            .bind(input.year_built)
            .bind(input.floors)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a property (cascades to its listings). Rarely used.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the view counter.
    pub async fn record_view(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE properties SET views_count = views_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
