/**
 * User Model and Credential Store
 *
 * This module defines the user record and the `UserStore` interface the
 * authentication core persists users through, with an in-memory and a
 * PostgreSQL implementation.
 *
 * # Uniqueness
 *
 * Email uniqueness is enforced by the store at write time: under the write
 * lock for `MemoryUserStore`, and by the `UNIQUE` constraint on
 * `users.email` for `PgUserStore`. A pre-check in the caller is only a
 * courtesy; `create` is authoritative.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User record
///
/// Deliberately not `Serialize`: the password hash must never reach a
/// response body.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID), assigned by the store
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields required to create a user
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another user already owns this email
    #[error("email already registered")]
    DuplicateEmail,

    /// Underlying storage failure
    #[error("storage error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::DuplicateEmail,
            _ => Self::Backend(err.to_string()),
        }
    }
}

/// Persistence interface for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user, failing with `DuplicateEmail` if the email is taken
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Get user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Get user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// In-memory user store
///
/// Used when no database is configured, and in tests.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<RwLock<MemoryUsers>>,
}

#[derive(Default)]
struct MemoryUsers {
    by_id: HashMap<Uuid, User>,
    id_by_email: HashMap<String, Uuid>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.inner.write().await;

        if users.id_by_email.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.id_by_email.insert(record.email.clone(), record.id);
        users.by_id.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.inner.read().await;
        Ok(users
            .id_by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }
}

/// PostgreSQL user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at
            "#
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
