//! Outbound mail configuration module

use serde::{Deserialize, Serialize};

/// Mail transport and queue configuration
///
/// Delivery itself happens in a separate queue worker; the services only
/// need the from-address and the queue name, the transport settings are
/// passed through to that worker.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// From address for outgoing mail
    pub from_address: String,

    /// Name of the queue list mail jobs are pushed onto
    pub queue_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::from("noreply@example.com"),
            queue_name: String::from("mail:queue"),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    ///
    /// Reads `MAIL_HOST`, `MAIL_PORT`, `MAIL_USERNAME`, `MAIL_PASSWORD`,
    /// `EMAIL_USER` (from address) and `MAIL_QUEUE_NAME`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("MAIL_HOST").unwrap_or(defaults.host),
            port: std::env::var("MAIL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            username: std::env::var("MAIL_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("MAIL_PASSWORD").unwrap_or(defaults.password),
            from_address: std::env::var("EMAIL_USER").unwrap_or(defaults.from_address),
            queue_name: std::env::var("MAIL_QUEUE_NAME").unwrap_or(defaults.queue_name),
        }
    }

    /// Set the queue name
    pub fn with_queue_name(mut self, name: impl Into<String>) -> Self {
        self.queue_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_config_default() {
        let config = MailConfig::default();
        assert_eq!(config.port, 587);
        assert_eq!(config.queue_name, "mail:queue");
        assert_eq!(config.from_address, "noreply@example.com");
    }

    #[test]
    fn test_mail_config_builder() {
        let config = MailConfig::default().with_queue_name("mail:high");
        assert_eq!(config.queue_name, "mail:high");
    }
}
