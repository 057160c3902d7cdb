//! Repository for the `messages` table.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::message::{CreateMessage, Message};

const COLUMNS: &str = "id, sender_id, recipient_id, subject, body, message_type, parent_id, \
                        is_read, read_at, priority, attachment_metadata, sent_at";

pub struct MessageRepo;

impl MessageRepo {
    pub async fn create(
        pool: &PgPool,
        sender_id: DbId,
        input: &CreateMessage,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (sender_id, recipient_id, subject, body, message_type,
                                   parent_id, priority, attachment_metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(sender_id)
            .bind(input.recipient_id)
            .bind(&input.subject)
            .bind(&input.body)
            .bind(&input.message_type)
            .bind(input.parent_id)
            .bind(&input.priority)
            .bind(&input.attachment_metadata)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's inbox, newest first.
    pub async fn list_inbox(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE recipient_id = $1
               AND (NOT $2 OR is_read = false)
             ORDER BY sent_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .bind(unread_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// A user's sent messages, newest first.
    pub async fn list_sent(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE sender_id = $1
             ORDER BY sent_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Replies to a message, oldest first.
    pub async fn list_replies(pool: &PgPool, parent_id: DbId) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE parent_id = $1
             ORDER BY sent_at"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a message read, stamping `read_at` exactly once.
    ///
    /// Idempotent: the guard on `is_read` makes a second call a no-op, so
    /// `read_at` keeps the timestamp of the first read. Returns the current
    /// row either way, or `None` if the message does not exist.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let update = format!(
            "UPDATE messages SET is_read = true, read_at = NOW()
             WHERE id = $1 AND is_read = false
             RETURNING {COLUMNS}"
        );
        if let Some(message) = sqlx::query_as::<_, Message>(&update)
            .bind(id)
            .fetch_optional(pool)
            .await?
        {
            return Ok(Some(message));
        }
        // Already read (or missing): return the row as-is.
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
