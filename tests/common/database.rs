//! Database test fixtures and utilities
//!
//! PostgreSQL tests need a server. They read `DATABASE_URL` and, when it is
//! unset, return early so the rest of the suite still runs without one.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a test database connection pool, if a database is configured
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to create test database pool");
    Some(pool)
}

/// Run database migrations for testing
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Test database fixture
///
/// Tests share one database and run in parallel, so they isolate
/// themselves with unique emails and token IDs instead of truncating.
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when `DATABASE_URL` is unset
    pub async fn connect() -> Option<Self> {
        let Some(pool) = create_test_pool().await else {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        };

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        Some(Self { pool })
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Number of users stored under `email`
    pub async fn count_users_with_email(&self, email: &str) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("count query")
    }
}

/// An email address no other test uses
pub fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4().simple())
}
