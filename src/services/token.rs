//! Bearer token issuance and verification
//!
//! HS256-signed JWTs carrying the user's id and username. The signing
//! secret comes from configuration; encoding and decoding keys are derived
//! once at startup and shared by every request.

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime in seconds. Fixed, not configuration.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// User id
    pub uid: i64,
    /// Expiry as seconds since the epoch
    pub exp: i64,
}

/// Error types for token verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Malformed token or bad signature
    #[error("token is invalid")]
    Invalid,

    /// Signature valid but expiry passed
    #[error("token is expired")]
    Expired,
}

/// Issues and verifies bearer tokens.
///
/// Holds the keys derived from the configured secret; nothing reads the
/// secret from ambient context at request time.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    /// Create a signer from the configured secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for the given user, expiring in one hour.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String> {
        let claims = Claims {
            sub: username.to_string(),
            uid: user_id,
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key).context("Failed to sign token")
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    ///
    /// - `Expired` if the signature is valid but the expiry has passed
    /// - `Invalid` for every other verification failure
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
