//! Per-request JWT signing for the Kling API.
//!
//! Every authenticated request carries a freshly signed HS256 token whose
//! issuer is the account access key. Tokens are never cached: signing is a
//! pure function of the credentials and the current time.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Token lifetime from the moment of signing.
pub const TOKEN_TTL_SECS: i64 = 30 * 60;

/// How far `nbf` is back-dated to absorb clock skew against the server.
pub const CLOCK_SKEW_SECS: i64 = 5;

/// Claims carried by every request token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer -- the account access key.
    pub iss: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Not-before time (UTC Unix timestamp).
    pub nbf: i64,
}

impl Claims {
    /// Claims for a token signed at `now`.
    pub fn issued_at(issuer: &str, now: i64) -> Self {
        Self {
            iss: issuer.to_string(),
            exp: now + TOKEN_TTL_SECS,
            nbf: now - CLOCK_SKEW_SECS,
        }
    }
}

/// Signs request tokens from a fixed pair of credentials.
#[derive(Clone)]
pub struct TokenSigner {
    access_key: String,
    key: EncodingKey,
}

impl TokenSigner {
    pub fn new(access_key: &str, secret_key: &str) -> Self {
        Self {
            access_key: access_key.to_string(),
            key: EncodingKey::from_secret(secret_key.as_bytes()),
        }
    }

    /// Sign a token valid from now.
    pub fn sign(&self) -> Result<String, jsonwebtoken::errors::Error> {
        self.sign_at(chrono::Utc::now().timestamp())
    }

    /// Sign a token as if the current time were `now` (Unix seconds).
    pub fn sign_at(&self, now: i64) -> Result<String, jsonwebtoken::errors::Error> {
        // Header::default() is {"alg": "HS256", "typ": "JWT"}.
        encode(
            &Header::default(),
            &Claims::issued_at(&self.access_key, now),
            &self.key,
        )
    }

    /// `Authorization` header value for a fresh token.
    pub fn bearer_header(&self) -> Result<String, jsonwebtoken::errors::Error> {
        Ok(format!("Bearer {}", self.sign()?))
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}
