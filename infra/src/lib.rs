//! # Authkit Infrastructure
//!
//! Concrete implementations of the core capability traits:
//! - **Database**: PostgreSQL repositories using SQLx
//! - **Cache**: Redis client, cache store, and revocation storage
//! - **Mail**: Redis-backed mail queue

pub mod cache;
pub mod database;
pub mod mail;

use ak_shared::config::AppConfig;

use cache::{RedisCacheStore, RedisClient};
use database::{DatabasePool, PgUserRepository};
use mail::RedisMailQueue;

// Re-export core types for convenience
pub use ak_core::errors::*;

/// Fully wired infrastructure services
pub struct Infrastructure {
    /// Configuration the services were built from
    pub config: AppConfig,
    /// PostgreSQL connection pool
    pub database: DatabasePool,
    /// Cache store over the shared Redis client
    pub cache: RedisCacheStore,
    /// Outbound mail queue
    pub mail: RedisMailQueue,
}

impl Infrastructure {
    /// Build a user repository over the shared pool
    pub fn user_repository(&self) -> PgUserRepository {
        PgUserRepository::new(self.database.get_pool().clone())
    }
}

/// Initialize the infrastructure layer from the environment.
///
/// Loads `.env` when present, reads the configuration, and connects the
/// database pool and the Redis client. The mail queue and cache store
/// share the same Redis connection.
pub async fn initialize() -> Result<Infrastructure, InfrastructureError> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    let database = DatabasePool::new(&config.database).await?;
    let client = RedisClient::new(&config.cache).await?;
    let cache = RedisCacheStore::new(client.clone());
    let mail = RedisMailQueue::new(client, &config.mail);

    tracing::info!(event = "infrastructure_initialized");

    Ok(Infrastructure {
        config,
        database,
        cache,
        mail,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::Database {
                message: e.to_string(),
            },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
