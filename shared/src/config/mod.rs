//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing secrets and token lifetimes
//! - `cache` - Redis connection configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound mail transport and queue configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod mail;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use mail::MailConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Mail configuration
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            cache: CacheConfig::default(),
            mail: MailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cache: CacheConfig::from_env(),
            mail: MailConfig::from_env(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}
