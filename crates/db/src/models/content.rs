//! Administrative content models: FAQs, legal documents, announcements, and
//! contact-form messages.

use homegrid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faq {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub display_order: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_faq_category")]
    pub category: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

fn default_faq_category() -> String {
    "general".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LegalDocument {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub version: String,
    pub effective_date: Timestamp,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateLegalDocument {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub version: String,
    pub effective_date: Timestamp,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLegalDocument {
    pub title: Option<String>,
    pub body: Option<String>,
    pub effective_date: Option<Timestamp>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub audience: String,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncement {
    pub title: String,
    pub body: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    #[serde(default)]
    pub is_published: bool,
}

fn default_audience() -> String {
    "all".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub body: Option<String>,
    pub audience: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}
