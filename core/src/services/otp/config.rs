//! Configuration for the one-time password service

use crate::domain::entities::otp::{DEFAULT_EXPIRATION_MINUTES, MAX_SEND_ATTEMPTS};

/// Configuration for the one-time password service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a code expires
    pub code_expiry_minutes: i64,
    /// Maximum number of sends allowed within one expiry window
    pub max_send_attempts: i64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiry_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_send_attempts: MAX_SEND_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OtpServiceConfig::default();
        assert_eq!(config.code_expiry_minutes, 5);
        assert_eq!(config.max_send_attempts, 3);
    }
}
