//! Configuration for the token service

use ak_shared::config::auth::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing and verifying access tokens
    pub access_secret: String,
    /// Secret for signing and verifying refresh tokens
    pub refresh_secret: String,
    /// Access token expiry in hours
    pub access_expiry_hours: i64,
    /// Refresh token expiry in days
    pub refresh_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "development-access-secret-change-in-production".to_string(),
            refresh_secret: "development-refresh-secret-change-in-production".to_string(),
            access_expiry_hours: 1,
            refresh_expiry_days: 7,
        }
    }
}

impl TokenServiceConfig {
    /// Access token lifetime in seconds
    pub fn access_expiry_seconds(&self) -> i64 {
        self.access_expiry_hours * 3600
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_expiry_seconds(&self) -> i64 {
        self.refresh_expiry_days * 24 * 3600
    }

    /// How long a revocation entry must outlive the tokens it covers.
    ///
    /// The entry is keyed per token but the blacklist is consulted for both
    /// kinds, so it has to last as long as the longest-lived token.
    pub fn revocation_ttl_seconds(&self) -> i64 {
        self.access_expiry_seconds().max(self.refresh_expiry_seconds())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_expiry_hours: config.access_expiry_hours,
            refresh_expiry_days: config.refresh_expiry_days,
        }
    }
}
