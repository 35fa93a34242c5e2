//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `wren_test`)
//!   `TEST_DB_PASSWORD` (default: `wren_test`)
//!   `TEST_DB_NAME` (default: `wren_test`)

#![allow(clippy::unwrap_used)]

use wren_db::test_utils::{TestDatabase, TestDbConfig};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_apply_cleanly() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    let result = wren_db::migrate(db.connection()).await;
    assert!(result.is_ok(), "Migrations failed: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_follow_pair_unique_index() {
    use sea_orm::ConnectionTrait;

    let db = TestDatabase::new().await.expect("Failed to connect");
    wren_db::migrate(db.connection()).await.expect("migrate");
    db.cleanup().await.expect("cleanup");

    let exec = |sql: String| {
        db.connection().execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            sql,
        ))
    };

    exec("INSERT INTO \"user\" (id, username, username_lower) VALUES ('u1', 'a', 'a'), ('u2', 'b', 'b')".to_string())
        .await
        .expect("insert users");
    exec("INSERT INTO \"follow\" (id, follower_id, followee_id) VALUES ('f1', 'u1', 'u2')"
        .to_string())
    .await
    .expect("insert follow");

    // Second identical pair must trip the unique index
    let dup = exec(
        "INSERT INTO \"follow\" (id, follower_id, followee_id) VALUES ('f2', 'u1', 'u2')"
            .to_string(),
    )
    .await;
    assert!(dup.is_err(), "Duplicate follow pair was accepted");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_user_delete_cascades_profile_and_follows() {
    use sea_orm::ConnectionTrait;

    let db = TestDatabase::new().await.expect("Failed to connect");
    wren_db::migrate(db.connection()).await.expect("migrate");
    db.cleanup().await.expect("cleanup");

    let exec = |sql: String| {
        db.connection().execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            sql,
        ))
    };
    let count = |sql: String| async {
        let row = db
            .connection()
            .query_one(sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                sql,
            ))
            .await
            .expect("count query")
            .expect("count row");
        row.try_get::<i64>("", "n").expect("count column")
    };

    exec("INSERT INTO \"user\" (id, username, username_lower) VALUES ('u1', 'a', 'a'), ('u2', 'b', 'b')".to_string())
        .await
        .expect("insert users");
    exec("INSERT INTO \"profile\" (user_id) VALUES ('u1')".to_string())
        .await
        .expect("insert profile");
    exec("INSERT INTO \"follow\" (id, follower_id, followee_id) VALUES ('f1', 'u1', 'u2'), ('f2', 'u2', 'u1')".to_string())
        .await
        .expect("insert follows");

    exec("DELETE FROM \"user\" WHERE id = 'u1'".to_string())
        .await
        .expect("delete user");

    // Profile and both follow directions must go with the user
    assert_eq!(
        count("SELECT COUNT(*) AS n FROM \"profile\" WHERE user_id = 'u1'".to_string()).await,
        0
    );
    assert_eq!(
        count(
            "SELECT COUNT(*) AS n FROM \"follow\" WHERE follower_id = 'u1' OR followee_id = 'u1'"
                .to_string()
        )
        .await,
        0
    );
}

#[test]
fn test_config_from_env() {
    // Default config is valid without a live database
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(config.database_url().starts_with("postgres://"));
}
