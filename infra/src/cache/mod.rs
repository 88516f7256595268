//! Cache module for Redis-based storage
//!
//! Provides the Redis client with retry logic and the [`CacheStore`]
//! implementation the core services run against in production.
//!
//! [`CacheStore`]: ak_core::cache::CacheStore

pub mod redis_client;
pub mod store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use store::RedisCacheStore;

// Re-export commonly used types
pub use ak_shared::config::cache::CacheConfig;
