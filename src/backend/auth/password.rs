/**
 * Password Hashing
 *
 * One-way bcrypt hashing and verification of user passwords.
 *
 * bcrypt salts every hash and is deliberately slow, so both operations run
 * on tokio's blocking pool rather than on a request worker. Verification
 * uses bcrypt's own comparison of the derived hash.
 */

use std::sync::Arc;
use thiserror::Error;

/// Password hashing errors
#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Plaintext behind the hash that unknown-email logins are checked against
const DUMMY_PASSWORD: &str = "authgate-dummy-password";

/// bcrypt-backed password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    ///
    /// Hashes the dummy password up front, so this blocks for one bcrypt
    /// round at the configured cost.
    ///
    /// # Errors
    ///
    /// Fails if bcrypt rejects the cost.
    pub fn new(cost: u32) -> Result<Self, HashError> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost)?;
        Ok(Self {
            cost,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Hash a plaintext password
    pub async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(hashed)
    }

    /// Check a plaintext password against a stored hash
    pub async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashError> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await??;
        Ok(matches)
    }

    /// Spend one verification's worth of work without a real user
    ///
    /// Login calls this when the email is unknown so the response time does
    /// not reveal whether the account exists.
    pub async fn verify_against_dummy(&self, plaintext: &str) -> Result<(), HashError> {
        self.verify(plaintext, &self.dummy_hash).await?;
        Ok(())
    }
}
