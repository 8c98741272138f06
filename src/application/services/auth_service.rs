//! Bearer token verification for mutating endpoints.
//!
//! Tokens are HS256 JWTs signed with a secret shared with the collaborator
//! login service; this service only verifies. Verification is stateless —
//! no token records live in the store.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::AppError;

/// Current Unix time in seconds.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Claims carried by an API token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Token subject — the account the collaborator issued it for.
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Service verifying Bearer tokens against the shared signing secret.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    /// Creates a new authentication service from the shared signing secret.
    pub fn new(signing_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_secret.as_bytes()),
        }
    }

    /// Issues a token for `subject`, valid for `valid_for`.
    ///
    /// Issuance normally belongs to the collaborator login service; this
    /// mirror of it exists for operational tooling and tests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_token(&self, subject: &str, valid_for: Duration) -> Result<String, AppError> {
        let now = unix_now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + valid_for.as_secs(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal("Failed to sign token", json!({ "reason": e.to_string() })))
    }

    /// Verifies a Bearer token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, mis-signed, or
    /// expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| {
                AppError::unauthorized(
                    "Invalid or expired token",
                    json!({ "reason": "Token verification failed" }),
                )
            })?;

        Ok(data.claims)
    }
}
