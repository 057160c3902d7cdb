//! HTTP handlers, one module per resource.

pub mod ad_requests;
pub mod auth;
pub mod banners;
pub mod campaigns;
pub mod content;
pub mod listings;
pub mod map;
pub mod messages;
pub mod open_houses;
pub mod properties;
pub mod saved_searches;
pub mod system_config;
pub mod tickets;
pub mod users;
