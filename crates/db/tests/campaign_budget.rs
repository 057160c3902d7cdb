//! Integration tests for ad-campaign budget derivation and review flow.

use chrono::Utc;
use homegrid_db::models::campaign::{CreateCampaign, UpdateCampaign};
use homegrid_db::models::user::CreateUser;
use homegrid_db::repositories::{CampaignRepo, UserRepo};
use sqlx::PgPool;

async fn create_advertiser(pool: &PgPool, email: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: "agent".to_string(),
        },
    )
    .await
    .expect("user creation");
    user.id
}

fn campaign(name: &str, budget: f64) -> CreateCampaign {
    CreateCampaign {
        name: name.to_string(),
        description: String::new(),
        start_date: Utc::now(),
        end_date: None,
        budget,
        bid_strategy: "cpm".to_string(),
        bid_amount: 2.5,
        target_audience: Some(serde_json::json!({"roles": ["buyer"]})),
        target_locations: None,
        target_devices: None,
    }
}

/// remaining_budget equals budget - total_spent immediately after create.
#[sqlx::test(migrations = "./migrations")]
async fn create_stamps_full_remaining_budget(pool: PgPool) {
    let owner = create_advertiser(&pool, "adv1@test.com").await;
    let created = CampaignRepo::create(&pool, owner, &campaign("Spring Push", 1000.0))
        .await
        .expect("create");

    assert_eq!(created.total_spent, 0.0);
    assert_eq!(created.remaining_budget, 1000.0);
    assert_eq!(created.status, "draft");
    assert_eq!(created.approval_status, "pending");
}

/// remaining_budget is recomputed on every update that touches budget or
/// spend, in either direction.
#[sqlx::test(migrations = "./migrations")]
async fn update_recomputes_remaining_budget(pool: PgPool) {
    let owner = create_advertiser(&pool, "adv2@test.com").await;
    let created = CampaignRepo::create(&pool, owner, &campaign("Summer Push", 1000.0))
        .await
        .unwrap();

    // Record spend.
    let updated = CampaignRepo::update(
        &pool,
        created.id,
        &UpdateCampaign {
            total_spent: Some(250.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.remaining_budget, updated.budget - updated.total_spent);
    assert_eq!(updated.remaining_budget, 750.0);

    // Raise the budget; spend unchanged.
    let updated = CampaignRepo::update(
        &pool,
        created.id,
        &UpdateCampaign {
            budget: Some(2000.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.remaining_budget, 1750.0);

    // Unrelated update keeps the derivation intact.
    let updated = CampaignRepo::update(
        &pool,
        created.id,
        &UpdateCampaign {
            description: Some("now with banners".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.remaining_budget, updated.budget - updated.total_spent);
}

/// Approval activates the campaign; rejection records the reason.
#[sqlx::test(migrations = "./migrations")]
async fn review_decisions_move_status(pool: PgPool) {
    let owner = create_advertiser(&pool, "adv3@test.com").await;
    let approved_target = CampaignRepo::create(&pool, owner, &campaign("A", 100.0)).await.unwrap();
    let rejected_target = CampaignRepo::create(&pool, owner, &campaign("B", 100.0)).await.unwrap();

    let approved = CampaignRepo::set_approval(&pool, approved_target.id, true, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.approval_status, "approved");
    assert_eq!(approved.status, "active");

    let rejected =
        CampaignRepo::set_approval(&pool, rejected_target.id, false, Some("misleading copy"))
            .await
            .unwrap()
            .unwrap();
    assert_eq!(rejected.approval_status, "rejected");
    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.rejection_reason.as_deref(), Some("misleading copy"));
}
