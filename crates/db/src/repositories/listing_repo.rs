//! Repository for the `listings`, `listing_photos`, and `price_history`
//! tables.

use homegrid_core::geo::BoundingBox;
use homegrid_core::listing::{days_on_market, price_change_pct};
use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::{
    CreateListing, CreateListingPhoto, GeoListing, Listing, ListingFilter, ListingPhoto,
    PriceHistory, UpdateListing,
};

const COLUMNS: &str = "id, property_id, user_id, listing_type, price, original_price, bedrooms, \
                        bathrooms, square_footage, floor, is_active, listed_date, contract_date, \
                        closing_date, days_on_market, views_count, inquiries_count, description, \
                        pet_policy, maintenance_fee, hoa_fee, created_at, updated_at";

const PHOTO_COLUMNS: &str = "id, listing_id, url, caption, is_primary, sort_order, uploaded_at";

const HISTORY_COLUMNS: &str = "id, listing_id, old_price, new_price, change_pct, reason, changed_at";

pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing. The original price is stamped from the initial
    /// price so later drops can be detected.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateListing,
    ) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings (property_id, user_id, listing_type, price, original_price,
                                   bedrooms, bathrooms, square_footage, floor, description,
                                   pet_policy, maintenance_fee, hoa_fee)
             VALUES ($1, $2, $3, $4, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(input.property_id)
            .bind(user_id)
            .bind(&input.listing_type)
            .bind(input.price)
            .bind(input.bedrooms.unwrap_or(0))
            .bind(input.bathrooms.unwrap_or(0.0))
            .bind(input.square_footage)
            .bind(input.floor)
            .bind(&input.description)
            .bind(&input.pet_policy)
            .bind(input.maintenance_fee)
            .bind(input.hoa_fee)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List listings with optional filters applied only when present.
    /// Inactive listings are excluded unless the filter asks for them.
    pub async fn list(
        pool: &PgPool,
        filter: &ListingFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings l
             WHERE ($1::bool OR l.is_active = true)
               AND ($2::text IS NULL OR l.listing_type = $2)
               AND ($3::float8 IS NULL OR l.price >= $3)
               AND ($4::float8 IS NULL OR l.price <= $4)
               AND ($5::int IS NULL OR l.bedrooms >= $5)
               AND ($6::text IS NULL OR l.property_id IN (
                        SELECT p.id FROM properties p
                        JOIN addresses a ON a.id = p.address_id
                        WHERE a.neighborhood = $6))
             ORDER BY l.listed_date DESC
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(filter.include_inactive)
            .bind(&filter.listing_type)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.min_bedrooms)
            .bind(&filter.neighborhood)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Active listings whose property address falls inside the bounding box,
    /// joined with the coordinates for map rendering.
    pub async fn list_in_bounds(
        pool: &PgPool,
        bbox: &BoundingBox,
    ) -> Result<Vec<GeoListing>, sqlx::Error> {
        sqlx::query_as::<_, GeoListing>(
            "SELECT l.id, l.property_id, l.listing_type, l.price, l.bedrooms,
                    a.latitude, a.longitude
             FROM listings l
             JOIN properties p ON p.id = l.property_id
             JOIN addresses a ON a.id = p.address_id
             WHERE l.is_active = true
               AND a.latitude  BETWEEN $1 AND $2
               AND a.longitude BETWEEN $3 AND $4
             ORDER BY l.id",
        )
        .bind(bbox.min_latitude)
        .bind(bbox.max_latitude)
        .bind(bbox.min_longitude)
        .bind(bbox.max_longitude)
        .fetch_all(pool)
        .await
    }

    /// Update a listing. Derived fields are recomputed inside one
    /// transaction:
    /// - `days_on_market` from the (possibly new) contract date
    /// - a `price_history` row is recorded when the price changes
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM listings WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Listing>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let new_price = input.price.unwrap_or(current.price);
        let contract_date = input.contract_date.or(current.contract_date);
        let dom = days_on_market(current.listed_date, contract_date);

        if input.price.is_some() && new_price != current.price {
            let history = format!(
                "INSERT INTO price_history (listing_id, old_price, new_price, change_pct, reason)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {HISTORY_COLUMNS}"
            );
            sqlx::query_as::<_, PriceHistory>(&history)
                .bind(id)
                .bind(current.price)
                .bind(new_price)
                .bind(price_change_pct(current.price, new_price))
                .bind(input.price_change_reason.as_deref().unwrap_or(""))
                .fetch_one(&mut *tx)
                .await?;
        }

        let update = format!(
            "UPDATE listings SET
                listing_type = COALESCE($2, listing_type),
                price = $3,
                bedrooms = COALESCE($4, bedrooms),
                bathrooms = COALESCE($5, bathrooms),
                square_footage = COALESCE($6, square_footage),
                floor = COALESCE($7, floor),
                contract_date = COALESCE($8, contract_date),
                closing_date = COALESCE($9, closing_date),
                days_on_market = $10,
                description = COALESCE($11, description),
                pet_policy = COALESCE($12, pet_policy),
                maintenance_fee = COALESCE($13, maintenance_fee),
                hoa_fee = COALESCE($14, hoa_fee),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Listing>(&update)
            .bind(id)
            .bind(&input.listing_type)
            .bind(new_price)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.square_footage)
            .bind(input.floor)
            .bind(input.contract_date)
            .bind(input.closing_date)
            .bind(dom)
            .bind(&input.description)
            .bind(&input.pet_policy)
            .bind(input.maintenance_fee)
            .bind(input.hoa_fee)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Deactivate a listing. Listings are never hard-deleted.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE listings SET is_active = false, updated_at = NOW()
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the inquiry counter.
    pub async fn record_inquiry(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE listings SET inquiries_count = inquiries_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Increment the view counter.
    pub async fn record_view(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE listings SET views_count = views_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    // -- Photos --

    pub async fn add_photo(
        pool: &PgPool,
        listing_id: DbId,
        input: &CreateListingPhoto,
    ) -> Result<ListingPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO listing_photos (listing_id, url, caption, is_primary, sort_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PHOTO_COLUMNS}"
        );
        sqlx::query_as::<_, ListingPhoto>(&query)
            .bind(listing_id)
            .bind(&input.url)
            .bind(&input.caption)
            .bind(input.is_primary)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn list_photos(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Vec<ListingPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {PHOTO_COLUMNS} FROM listing_photos
             WHERE listing_id = $1
             ORDER BY is_primary DESC, sort_order, id"
        );
        sqlx::query_as::<_, ListingPhoto>(&query)
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete_photo(pool: &PgPool, photo_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listing_photos WHERE id = $1")
            .bind(photo_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Price history --

    pub async fn list_price_history(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Vec<PriceHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM price_history
             WHERE listing_id = $1
             ORDER BY changed_at DESC"
        );
        sqlx::query_as::<_, PriceHistory>(&query)
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }
}
