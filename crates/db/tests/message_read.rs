//! Integration tests for message mark-read idempotence.

use homegrid_db::models::message::CreateMessage;
use homegrid_db::models::user::CreateUser;
use homegrid_db::repositories::{MessageRepo, UserRepo};
use sqlx::PgPool;

async fn create_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: "buyer".to_string(),
        },
    )
    .await
    .expect("user creation")
    .id
}

async fn send(pool: &PgPool, sender: i64, recipient: i64, body: &str) -> i64 {
    MessageRepo::create(
        pool,
        sender,
        &CreateMessage {
            recipient_id: recipient,
            subject: "Re: open house".to_string(),
            body: body.to_string(),
            message_type: "inquiry".to_string(),
            parent_id: None,
            priority: "medium".to_string(),
            attachment_metadata: None,
        },
    )
    .await
    .expect("message creation")
    .id
}

/// Marking a message read sets the flag and stamps read_at; a second call is
/// a no-op that preserves the original timestamp.
#[sqlx::test(migrations = "./migrations")]
async fn mark_read_is_idempotent(pool: PgPool) {
    let sender = create_user(&pool, "sender@test.com").await;
    let recipient = create_user(&pool, "recipient@test.com").await;
    let message_id = send(&pool, sender, recipient, "Is Saturday still on?").await;

    let unread = MessageRepo::find_by_id(&pool, message_id).await.unwrap().unwrap();
    assert!(!unread.is_read);
    assert!(unread.read_at.is_none());

    let first = MessageRepo::mark_read(&pool, message_id).await.unwrap().unwrap();
    assert!(first.is_read);
    let first_read_at = first.read_at.expect("read_at stamped");

    let second = MessageRepo::mark_read(&pool, message_id).await.unwrap().unwrap();
    assert!(second.is_read);
    assert_eq!(second.read_at, Some(first_read_at), "read_at must not move");
}

/// Mark-read on a missing message returns None rather than erroring.
#[sqlx::test(migrations = "./migrations")]
async fn mark_read_missing_message_is_none(pool: PgPool) {
    assert!(MessageRepo::mark_read(&pool, 999_999).await.unwrap().is_none());
}

/// The unread-only inbox filter drops read messages.
#[sqlx::test(migrations = "./migrations")]
async fn unread_filter_tracks_read_state(pool: PgPool) {
    let sender = create_user(&pool, "s2@test.com").await;
    let recipient = create_user(&pool, "r2@test.com").await;
    let first = send(&pool, sender, recipient, "one").await;
    let second = send(&pool, sender, recipient, "two").await;

    let unread = MessageRepo::list_inbox(&pool, recipient, true, 20, 0).await.unwrap();
    assert_eq!(unread.len(), 2);

    MessageRepo::mark_read(&pool, first).await.unwrap();

    let unread = MessageRepo::list_inbox(&pool, recipient, true, 20, 0).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id, second);

    let all = MessageRepo::list_inbox(&pool, recipient, false, 20, 0).await.unwrap();
    assert_eq!(all.len(), 2);
}

/// Replies attach to their parent and list in thread order.
#[sqlx::test(migrations = "./migrations")]
async fn replies_thread_under_parent(pool: PgPool) {
    let a = create_user(&pool, "thread-a@test.com").await;
    let b = create_user(&pool, "thread-b@test.com").await;
    let parent = send(&pool, a, b, "opening").await;

    let reply = MessageRepo::create(
        &pool,
        b,
        &CreateMessage {
            recipient_id: a,
            subject: String::new(),
            body: "reply".to_string(),
            message_type: "text".to_string(),
            parent_id: Some(parent),
            priority: "medium".to_string(),
            attachment_metadata: None,
        },
    )
    .await
    .unwrap();

    let replies = MessageRepo::list_replies(&pool, parent).await.unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].id, reply.id);
    assert_eq!(replies[0].parent_id, Some(parent));
}
