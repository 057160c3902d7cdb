//! Repository for the `support_tickets` table.

use homegrid_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket::{CreateTicket, SupportTicket, UpdateTicket};

const COLUMNS: &str = "id, user_id, subject, description, category, status, priority, \
                        assigned_to, resolution_notes, resolved_at, escalation_level, \
                        created_at, updated_at";

pub struct TicketRepo;

impl TicketRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTicket,
    ) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (user_id, subject, description, category, priority)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .bind(&input.subject)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support_tickets WHERE id = $1");
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's own tickets, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_tickets
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All tickets, optionally filtered by status. Staff view.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_tickets
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Staff update: status transitions, assignment, resolution notes.
    /// Moving to `resolved` stamps `resolved_at`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET
                status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                assigned_to = COALESCE($4, assigned_to),
                resolution_notes = COALESCE($5, resolution_notes),
                escalation_level = COALESCE($6, escalation_level),
                resolved_at = CASE WHEN $2 = 'resolved' THEN NOW() ELSE resolved_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.assigned_to)
            .bind(&input.resolution_notes)
            .bind(input.escalation_level)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM support_tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
