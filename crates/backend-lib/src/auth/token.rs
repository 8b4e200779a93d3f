// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Session token issuance and verification.
//!
//! Tokens are self-contained HS256 JWTs carrying the subject's user id and
//! an expiry; verification is stateless and never touches the store.
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::AppError;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user identifier
    pub sub: Uuid,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: Uuid, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: subject,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
}

/// Why a token failed verification. Clients receive a single `Unauthorized`
/// either way; the split exists for logs and metrics.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    Invalid,
}

/// Issues and verifies session tokens against the process-wide secret.
pub struct Tokens {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    ttl: Duration,
}

impl Tokens {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }

    /// Issue a token for `subject`, expiring after the configured TTL.
    pub fn issue(&self, subject: Uuid) -> Result<String, AppError> {
        self.encode(&Claims::new(subject, self.ttl))
            .map_err(|e| AppError::Internal(format!("token encoding failed: {e}")))
    }

    /// Check signature integrity and expiry, returning the embedded subject.
    /// Zero leeway: a token is valid exactly within `[iat, iat + TTL)`.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = jsonwebtoken::Validation::default();
        validation.leeway = 0;

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
