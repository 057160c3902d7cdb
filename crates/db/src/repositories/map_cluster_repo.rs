//! Repository for the `map_clusters` table.
//!
//! Cluster aggregates are recomputed by re-running the bounding-box listing
//! query per cluster and writing the stats back. Recomputation is
//! read-then-write; concurrent refreshes of the same cluster race and the
//! last write wins, which is acceptable for advisory display aggregates.

use homegrid_core::cluster::{ClusterStats, ListingPoint};
use homegrid_core::geo::{BoundingBox, GeoPoint};
use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::map_cluster::{CreateMapCluster, MapCluster};

const COLUMNS: &str = "id, center_latitude, center_longitude, radius_km, property_count, \
                        listing_count, avg_price, last_refreshed";

pub struct MapClusterRepo;

impl MapClusterRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMapCluster,
    ) -> Result<MapCluster, sqlx::Error> {
        let query = format!(
            "INSERT INTO map_clusters (center_latitude, center_longitude, radius_km)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MapCluster>(&query)
            .bind(input.center_latitude)
            .bind(input.center_longitude)
            .bind(input.radius_km)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MapCluster>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM map_clusters WHERE id = $1");
        sqlx::query_as::<_, MapCluster>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MapCluster>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM map_clusters ORDER BY id");
        sqlx::query_as::<_, MapCluster>(&query).fetch_all(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM map_clusters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute one cluster's aggregates from the active listings inside
    /// its bounding box. Returns the refreshed row, or `None` if the cluster
    /// no longer exists or its stored center is somehow invalid.
    pub async fn refresh(pool: &PgPool, id: DbId) -> Result<Option<MapCluster>, sqlx::Error> {
        let Some(cluster) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let Ok(center) = GeoPoint::new(cluster.center_latitude, cluster.center_longitude) else {
            return Ok(None);
        };
        let Ok(bbox) = BoundingBox::around(center, cluster.radius_km) else {
            return Ok(None);
        };

        let points: Vec<ListingPoint> = sqlx::query_as::<_, (DbId, f64)>(
            "SELECT l.property_id, l.price
             FROM listings l
             JOIN properties p ON p.id = l.property_id
             JOIN addresses a ON a.id = p.address_id
             WHERE l.is_active = true
               AND a.latitude  BETWEEN $1 AND $2
               AND a.longitude BETWEEN $3 AND $4",
        )
        .bind(bbox.min_latitude)
        .bind(bbox.max_latitude)
        .bind(bbox.min_longitude)
        .bind(bbox.max_longitude)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(property_id, price)| ListingPoint { property_id, price })
        .collect();

        let stats = ClusterStats::compute(&points);

        let query = format!(
            "UPDATE map_clusters SET
                property_count = $2,
                listing_count = $3,
                avg_price = $4,
                last_refreshed = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MapCluster>(&query)
            .bind(id)
            .bind(stats.property_count)
            .bind(stats.listing_count)
            .bind(stats.avg_price)
            .fetch_optional(pool)
            .await
    }

    /// Recompute every registered cluster. Invoked synchronously after
    /// listing writes and before serving cluster reads; there is no
    /// background schedule.
    pub async fn refresh_all(pool: &PgPool) -> Result<Vec<MapCluster>, sqlx::Error> {
        let clusters = Self::list(pool).await?;
        let mut refreshed = Vec::with_capacity(clusters.len());
        for cluster in clusters {
            if let Some(updated) = Self::refresh(pool, cluster.id).await? {
                refreshed.push(updated);
            }
        }
        Ok(refreshed)
    }
}
