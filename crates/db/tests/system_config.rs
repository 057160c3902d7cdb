//! Integration tests for the single-active SystemConfig invariant.

use homegrid_db::models::system_config::{CreateSystemConfig, UpdateSystemConfig};
use homegrid_db::repositories::SystemConfigRepo;
use sqlx::PgPool;

fn config(name: &str, version: &str, is_active: bool) -> CreateSystemConfig {
    CreateSystemConfig {
        name: name.to_string(),
        version: version.to_string(),
        is_active,
        settings: Some(serde_json::json!({"default_radius": 5})),
        description: String::new(),
        maintenance_mode: false,
        default_currency: "USD".to_string(),
        max_upload_size_mb: 10,
    }
}

async fn active_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM system_configs WHERE is_active = true")
        .fetch_one(pool)
        .await
        .expect("count query")
}

/// Creating a new active config deactivates the previous one.
#[sqlx::test(migrations = "./migrations")]
async fn creating_active_config_deactivates_others(pool: PgPool) {
    let first = SystemConfigRepo::create(&pool, &config("base", "v1.0.0", true))
        .await
        .expect("first create");
    assert!(first.is_active);

    let second = SystemConfigRepo::create(&pool, &config("rollout", "v1.1.0", true))
        .await
        .expect("second create");
    assert!(second.is_active);

    assert_eq!(active_count(&pool).await, 1);
    let active = SystemConfigRepo::find_active(&pool).await.unwrap().unwrap();
    assert_eq!(active.id, second.id);
}

/// Activating an existing config via update also maintains the invariant,
/// across an arbitrary sequence of saves.
#[sqlx::test(migrations = "./migrations")]
async fn activation_via_update_keeps_single_active(pool: PgPool) {
    let a = SystemConfigRepo::create(&pool, &config("a", "v1.0.0", true)).await.unwrap();
    let b = SystemConfigRepo::create(&pool, &config("b", "v1.1.0", false)).await.unwrap();
    let c = SystemConfigRepo::create(&pool, &config("c", "v1.2.0", false)).await.unwrap();

    for target in [b.id, c.id, a.id, c.id] {
        let updated = SystemConfigRepo::update(
            &pool,
            target,
            &UpdateSystemConfig {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("row exists");
        assert!(updated.is_active);
        assert_eq!(active_count(&pool).await, 1);

        let active = SystemConfigRepo::find_active(&pool).await.unwrap().unwrap();
        assert_eq!(active.id, target);
    }
}

/// An update that does not touch `is_active` leaves the active row alone.
#[sqlx::test(migrations = "./migrations")]
async fn non_activation_update_preserves_active_row(pool: PgPool) {
    let active = SystemConfigRepo::create(&pool, &config("a", "v1.0.0", true)).await.unwrap();
    let other = SystemConfigRepo::create(&pool, &config("b", "v1.1.0", false)).await.unwrap();

    SystemConfigRepo::update(
        &pool,
        other.id,
        &UpdateSystemConfig {
            description: Some("tweaked".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let current = SystemConfigRepo::find_active(&pool).await.unwrap().unwrap();
    assert_eq!(current.id, active.id);
}

/// Duplicate versions are refused by the unique constraint.
#[sqlx::test(migrations = "./migrations")]
async fn duplicate_version_is_a_conflict(pool: PgPool) {
    SystemConfigRepo::create(&pool, &config("a", "v1.0.0", false)).await.unwrap();
    let err = SystemConfigRepo::create(&pool, &config("b", "v1.0.0", false))
        .await
        .expect_err("duplicate version must fail");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}
