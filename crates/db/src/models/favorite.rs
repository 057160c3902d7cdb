//! Favorite (user ↔ listing) model.

use homegrid_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub listing_id: DbId,
    pub created_at: Timestamp,
}
