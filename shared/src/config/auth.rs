//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// Access and refresh tokens are signed with independent secrets so the two
/// token classes can be rotated separately.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing access tokens
    pub access_secret: String,

    /// Secret key for signing refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime in hours
    pub access_expiry_hours: i64,

    /// Refresh token lifetime in days
    pub refresh_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("access-secret-change-in-production"),
            refresh_secret: String::from("refresh-secret-change-in-production"),
            access_expiry_hours: 1,
            refresh_expiry_days: 7,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with explicit secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// Reads `JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET`,
    /// `ACCESS_TOKEN_EXPIRES_IN` (hours) and `REFRESH_TOKEN_EXPIRES_IN` (days).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let access_secret =
            std::env::var("JWT_ACCESS_SECRET").unwrap_or(defaults.access_secret);
        let refresh_secret =
            std::env::var("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret);
        let access_expiry_hours = std::env::var("ACCESS_TOKEN_EXPIRES_IN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_expiry_hours);
        let refresh_expiry_days = std::env::var("REFRESH_TOKEN_EXPIRES_IN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.refresh_expiry_days);

        Self {
            access_secret,
            refresh_secret,
            access_expiry_hours,
            refresh_expiry_days,
        }
    }

    /// Set access token expiry in hours
    pub fn with_access_expiry_hours(mut self, hours: i64) -> Self {
        self.access_expiry_hours = hours;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_expiry_days = days;
        self
    }

    /// Access token lifetime in seconds
    pub fn access_expiry_seconds(&self) -> i64 {
        self.access_expiry_hours * 3600
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_expiry_seconds(&self) -> i64 {
        self.refresh_expiry_days * 24 * 3600
    }

    /// Longest possible remaining token lifetime in seconds
    ///
    /// Revocation entries use this TTL so they outlive any token they guard.
    pub fn max_token_life_seconds(&self) -> i64 {
        self.access_expiry_seconds().max(self.refresh_expiry_seconds())
    }

    /// Check if either secret is still the built-in default (security warning)
    pub fn is_using_default_secrets(&self) -> bool {
        self.access_secret == "access-secret-change-in-production"
            || self.refresh_secret == "refresh-secret-change-in-production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_expiry_hours, 1);
        assert_eq!(config.refresh_expiry_days, 7);
        assert!(config.is_using_default_secrets());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("a-secret", "r-secret")
            .with_access_expiry_hours(2)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_expiry_seconds(), 7200);
        assert_eq!(config.refresh_expiry_seconds(), 14 * 86400);
        assert!(!config.is_using_default_secrets());
    }

    #[test]
    fn test_max_token_life() {
        let config = JwtConfig::default();
        assert_eq!(config.max_token_life_seconds(), 7 * 86400);

        // A short refresh window makes the access lifetime dominate
        let config = JwtConfig::default()
            .with_access_expiry_hours(48)
            .with_refresh_expiry_days(1);
        assert_eq!(config.max_token_life_seconds(), 48 * 3600);
    }
}
