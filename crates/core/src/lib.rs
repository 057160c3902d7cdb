//! Domain logic for the Homegrid marketplace.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI or worker tooling.

pub mod cache;
pub mod campaign;
pub mod cluster;
pub mod error;
pub mod geo;
pub mod listing;
pub mod messaging;
pub mod pagination;
pub mod roles;
pub mod ticket;
pub mod types;
pub mod user;
