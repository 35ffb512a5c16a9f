//! Database migration tests
//!
//! Tests to ensure migrations run correctly and the schema holds the
//! constraints the stores rely on.

use crate::common::*;
use uuid::Uuid;

#[tokio::test]
async fn test_migrations_run_successfully() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };

    // A second run finds everything applied
    let result = run_migrations(db.pool()).await;
    assert!(result.is_ok(), "Migrations should be re-runnable: {:?}", result);
}

#[tokio::test]
async fn test_tables_exist() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };

    for table in ["users", "revoked_tokens"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
            .execute(db.pool())
            .await;
        assert!(result.is_ok(), "{} table should exist", table);
    }
}

#[tokio::test]
async fn test_users_email_is_unique() {
    let Some(db) = TestDatabase::connect().await else {
        return;
    };
    let email = unique_email();

    let insert = |id: Uuid| {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at) \
             VALUES ($1, 'Test User', $2, 'hash', NOW())",
        )
        .bind(id)
        .bind(email.clone())
        .execute(db.pool())
    };

    insert(Uuid::new_v4()).await.expect("first insert");
    let err = insert(Uuid::new_v4()).await.expect_err("duplicate insert");

    let is_unique = err
        .as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false);
    assert!(is_unique, "expected a unique violation, got {:?}", err);
}
