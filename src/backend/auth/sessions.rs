/**
 * Session Tokens
 *
 * This module issues and checks the signed bearer tokens that stand in for a
 * server-side session.
 *
 * # Token Lifecycle
 *
 * ```text
 * issue ──► Valid ──► Expired      (now >= exp)
 *              └────► Invalidated  (jti on the revocation list)
 * ```
 *
 * Both end states are terminal; the only way back is a brand-new token.
 * `refresh` issues the new token and revokes the presented one in the same
 * call, so at most one token from a refresh chain is live at a time.
 *
 * # Verification Order
 *
 * 1. Signature and encoding (`TokenError::Invalid`)
 * 2. Expiry, with no leeway (`TokenError::Expired`)
 * 3. Revocation list (`TokenError::Invalid`)
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::StoreError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token ID, the unit of revocation
    pub jti: String,
}

/// A freshly signed token and the facts encoded in it
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub subject: Uuid,
    pub jti: Uuid,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Malformed, forged, or revoked
    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    /// Signing or revocation-store failure
    #[error("token service failure: {0}")]
    Internal(String),
}

impl From<StoreError> for TokenError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Claims after the identifiers have been parsed
struct VerifiedClaims {
    subject: Uuid,
    jti: Uuid,
    expires_at: i64,
}

impl TryFrom<Claims> for VerifiedClaims {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let subject = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Invalid)?;
        let jti = Uuid::parse_str(&claims.jti).map_err(|_| TokenError::Invalid)?;
        Ok(Self {
            subject,
            jti,
            expires_at: claims.exp,
        })
    }
}

/// Storage for revoked token IDs
///
/// Entries only need to outlive the token they block; `purge_expired`
/// drops the rest.
#[async_trait]
pub trait RevocationList: Send + Sync {
    /// Revoke a token until `expires_at`
    ///
    /// Returns `true` only for the call that inserted the entry; revoking an
    /// already revoked token returns `false` and changes nothing.
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<bool, StoreError>;

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, StoreError>;

    /// Remove entries whose token expired at or before `now`
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}

/// In-memory revocation list
#[derive(Clone, Default)]
pub struct MemoryRevocationList {
    entries: Arc<RwLock<HashMap<Uuid, DateTime<Utc>>>>,
}

impl MemoryRevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl RevocationList for MemoryRevocationList {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        match self.entries.write().await.entry(jti) {
            Entry::Vacant(entry) => {
                entry.insert(expires_at);
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, StoreError> {
        Ok(self.entries.read().await.contains_key(&jti))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        Ok((before - entries.len()) as u64)
    }
}

/// PostgreSQL revocation list (`revoked_tokens` table)
#[derive(Clone)]
pub struct PgRevocationList {
    pool: PgPool,
}

impl PgRevocationList {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationList for PgRevocationList {
    async fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#
        )
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, StoreError> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)"
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Issues, verifies, refreshes and invalidates bearer tokens
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<SigningKeys>,
    validation: Validation,
    ttl: Duration,
    revocations: Arc<dyn RevocationList>,
}

impl TokenService {
    /// Create a token service signing with HS256
    ///
    /// # Arguments
    /// * `secret` - HMAC secret
    /// * `ttl` - Lifetime of every issued token
    /// * `revocations` - Where invalidated token IDs are kept
    pub fn new(secret: &[u8], ttl: Duration, revocations: Arc<dyn RevocationList>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is checked by hand after the signature, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            keys: Arc::new(SigningKeys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            validation,
            ttl,
            revocations,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a token for a user
    pub fn issue(&self, user_id: Uuid) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let exp = now.saturating_add(ttl);
        let jti = Uuid::new_v4();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp,
            jti: jti.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Internal(format!("failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            subject: user_id,
            jti,
            issued_at: now,
            expires_at: exp,
        })
    }

    /// Verify a token and return the user ID it was issued to
    pub async fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify_claims(token).await.map(|claims| claims.subject)
    }

    /// Exchange a valid token for a new one and revoke the old
    ///
    /// Expired or invalid tokens are refused and nothing is issued. The old
    /// token is revoked before the new one is signed, and only the refresh
    /// whose revocation inserted the entry gets a token; concurrent refreshes
    /// of the same token lose with `Invalid`.
    pub async fn refresh(&self, token: &str) -> Result<IssuedToken, TokenError> {
        let current = self.verify_claims(token).await?;

        let claimed = self
            .revocations
            .revoke(current.jti, expiry_instant(current.expires_at))
            .await?;
        if !claimed {
            return Err(TokenError::Invalid);
        }

        self.issue(current.subject)
    }

    /// Make a token unusable for future `verify` calls
    ///
    /// Tokens that are unsigned, forged or already expired can never verify
    /// again, so they are accepted without touching the revocation list.
    pub async fn invalidate(&self, token: &str) -> Result<(), TokenError> {
        let claims = match self.decode_claims(token).and_then(VerifiedClaims::try_from) {
            Ok(claims) => claims,
            Err(_) => {
                tracing::debug!("Ignoring invalidation of an unverifiable token");
                return Ok(());
            }
        };

        if Utc::now().timestamp() >= claims.expires_at {
            return Ok(());
        }

        self.revocations
            .revoke(claims.jti, expiry_instant(claims.expires_at))
            .await?;
        Ok(())
    }

    /// Drop revocation entries for tokens that have expired anyway
    pub async fn purge_expired(&self) -> Result<u64, TokenError> {
        Ok(self.revocations.purge_expired(Utc::now()).await?)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token failed verification: {:?}", e.kind());
                TokenError::Invalid
            })
    }

    async fn verify_claims(&self, token: &str) -> Result<VerifiedClaims, TokenError> {
        let claims = VerifiedClaims::try_from(self.decode_claims(token)?)?;

        if Utc::now().timestamp() >= claims.expires_at {
            return Err(TokenError::Expired);
        }

        if self.revocations.is_revoked(claims.jti).await? {
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }
}

fn expiry_instant(exp: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
