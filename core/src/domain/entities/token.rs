//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Display name of the user
    pub name: String,

    /// Email address of the user
    pub email: String,

    /// JWT ID (unique identifier for the token), absent on legacy tokens
    pub jti: Option<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates new claims with a fresh token identifier
    ///
    /// # Arguments
    ///
    /// * `sub` - The user's ID as a string
    /// * `name` - The user's display name
    /// * `email` - The user's email address
    /// * `lifetime` - How long the token stays valid
    pub fn new(sub: String, name: String, email: String, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub,
            name,
            email,
            jti: Some(Uuid::new_v4().to_string()),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Builds the revocation list key for this token.
    ///
    /// Keys are scoped per user and per token so revoking one token never
    /// touches its sibling. Returns `None` when the token carries no `jti`.
    pub fn blacklist_key(&self) -> Option<String> {
        self.jti
            .as_ref()
            .map(|jti| format!("bl:{}:{}", self.sub, jti))
    }
}

/// A freshly issued access/refresh token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}
