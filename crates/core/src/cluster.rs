//! Map-cluster aggregation.
//!
//! A cluster is a fixed geographic circle (center + radius) carrying cached
//! display aggregates: how many distinct properties and active listings fall
//! inside its bounding box, and the mean listing price. The repository layer
//! fetches the in-box listings and hands them here; recomputation is
//! read-then-write and last-write-wins, which is acceptable because the
//! values are advisory display aggregates, not a ledger.

use std::collections::HashSet;

use crate::types::DbId;

/// One listing inside a cluster's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct ListingPoint {
    pub property_id: DbId,
    pub price: f64,
}

/// Recomputed aggregates for a single cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterStats {
    /// Count of distinct properties with at least one in-box listing.
    pub property_count: i64,
    /// Count of in-box listings.
    pub listing_count: i64,
    /// Arithmetic mean listing price, `None` when the box is empty.
    pub avg_price: Option<f64>,
}

impl ClusterStats {
    /// Aggregate the given listings. Pure: identical input yields identical
    /// stats regardless of ordering.
    pub fn compute(listings: &[ListingPoint]) -> Self {
        if listings.is_empty() {
            return Self {
                property_count: 0,
                listing_count: 0,
                avg_price: None,
            };
        }

        let properties: HashSet<DbId> = listings.iter().map(|l| l.property_id).collect();
        let total: f64 = listings.iter().map(|l| l.price).sum();

        Self {
            property_count: properties.len() as i64,
            listing_count: listings.len() as i64,
            avg_price: Some(total / listings.len() as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lp(property_id: DbId, price: f64) -> ListingPoint {
        ListingPoint { property_id, price }
    }

    #[test]
    fn empty_box_yields_zero_counts_and_no_average() {
        let stats = ClusterStats::compute(&[]);
        assert_eq!(stats.property_count, 0);
        assert_eq!(stats.listing_count, 0);
        assert_eq!(stats.avg_price, None);
    }

    #[test]
    fn distinct_properties_counted_once() {
        // Two listings on the same property, one on another.
        let stats = ClusterStats::compute(&[lp(1, 100.0), lp(1, 200.0), lp(2, 300.0)]);
        assert_eq!(stats.property_count, 2);
        assert_eq!(stats.listing_count, 3);
        assert_eq!(stats.avg_price, Some(200.0));
    }

    #[test]
    fn single_listing_average_is_its_price() {
        let stats = ClusterStats::compute(&[lp(7, 450_000.0)]);
        assert_eq!(stats.property_count, 1);
        assert_eq!(stats.listing_count, 1);
        assert_eq!(stats.avg_price, Some(450_000.0));
    }

    #[test]
    fn compute_is_order_independent() {
        let forward = ClusterStats::compute(&[lp(1, 10.0), lp(2, 20.0), lp(3, 30.0)]);
        let reversed = ClusterStats::compute(&[lp(3, 30.0), lp(2, 20.0), lp(1, 10.0)]);
        assert_eq!(forward, reversed);
    }
}
