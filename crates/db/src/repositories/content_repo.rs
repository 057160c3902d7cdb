//! Repositories for administrative content: FAQs, legal documents,
//! announcements, and contact-form messages.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{
    Announcement, ContactMessage, CreateAnnouncement, CreateContactMessage, CreateFaq,
    CreateLegalDocument, Faq, LegalDocument, UpdateAnnouncement, UpdateFaq, UpdateLegalDocument,
};

const FAQ_COLUMNS: &str = "id, question, answer, category, display_order, is_published, \
                            created_at, updated_at";

pub struct FaqRepo;

impl FaqRepo {
    pub async fn create(pool: &PgPool, input: &CreateFaq) -> Result<Faq, sqlx::Error> {
        let query = format!(
            "INSERT INTO faqs (question, answer, category, display_order, is_published)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {FAQ_COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.display_order)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!("SELECT {FAQ_COLUMNS} FROM faqs WHERE id = $1");
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published FAQs in display order; staff can include unpublished ones.
    pub async fn list(pool: &PgPool, include_unpublished: bool) -> Result<Vec<Faq>, sqlx::Error> {
        let query = format!(
            "SELECT {FAQ_COLUMNS} FROM faqs
             WHERE ($1::bool OR is_published = true)
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(include_unpublished)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFaq,
    ) -> Result<Option<Faq>, sqlx::Error> {
        let query = format!(
            "UPDATE faqs SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                category = COALESCE($4, category),
                display_order = COALESCE($5, display_order),
                is_published = COALESCE($6, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {FAQ_COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(&input.category)
            .bind(input.display_order)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

const LEGAL_COLUMNS: &str = "id, title, slug, body, version, effective_date, is_published, \
                              created_at, updated_at";

pub struct LegalDocumentRepo;

impl LegalDocumentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateLegalDocument,
    ) -> Result<LegalDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO legal_documents (title, slug, body, version, effective_date,
                                          is_published)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {LEGAL_COLUMNS}"
        );
        sqlx::query_as::<_, LegalDocument>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.body)
            .bind(&input.version)
            .bind(input.effective_date)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LegalDocument>, sqlx::Error> {
        let query = format!("SELECT {LEGAL_COLUMNS} FROM legal_documents WHERE id = $1");
        sqlx::query_as::<_, LegalDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The latest published version of a document, by effective date.
    pub async fn find_current_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<LegalDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {LEGAL_COLUMNS} FROM legal_documents
             WHERE slug = $1 AND is_published = true AND effective_date <= NOW()
             ORDER BY effective_date DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, LegalDocument>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        include_unpublished: bool,
    ) -> Result<Vec<LegalDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {LEGAL_COLUMNS} FROM legal_documents
             WHERE ($1::bool OR is_published = true)
             ORDER BY slug, effective_date DESC"
        );
        sqlx::query_as::<_, LegalDocument>(&query)
            .bind(include_unpublished)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLegalDocument,
    ) -> Result<Option<LegalDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE legal_documents SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                effective_date = COALESCE($4, effective_date),
                is_published = COALESCE($5, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {LEGAL_COLUMNS}"
        );
        sqlx::query_as::<_, LegalDocument>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.effective_date)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM legal_documents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

const ANNOUNCEMENT_COLUMNS: &str = "id, title, body, audience, starts_at, ends_at, is_published, \
                                     created_at, updated_at";

pub struct AnnouncementRepo;

impl AnnouncementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (title, body, audience, starts_at, ends_at, is_published)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.audience)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published announcements currently inside their display window.
    pub async fn list_current(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
             WHERE is_published = true
               AND (starts_at IS NULL OR starts_at <= NOW())
               AND (ends_at IS NULL OR ends_at > NOW())
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Announcement>(&query).fetch_all(pool).await
    }

    /// Every announcement, for the staff view.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Announcement>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                audience = COALESCE($4, audience),
                starts_at = COALESCE($5, starts_at),
                ends_at = COALESCE($6, ends_at),
                is_published = COALESCE($7, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.audience)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

const CONTACT_COLUMNS: &str = "id, name, email, subject, body, status, created_at";

pub struct ContactMessageRepo;

impl ContactMessageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {CONTACT_COLUMNS} FROM contact_messages WHERE id = $1");
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Move a contact message through its triage states.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_messages SET status = $2
             WHERE id = $1
             RETURNING {CONTACT_COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
