//! Production cache store backed by Redis

use async_trait::async_trait;
use std::time::Duration;

use ak_core::cache::CacheStore;
use ak_core::errors::DomainResult;

use super::redis_client::RedisClient;

/// [`CacheStore`] implementation over the shared Redis client
#[derive(Clone)]
pub struct RedisCacheStore {
    client: RedisClient,
}

impl RedisCacheStore {
    /// Wrap an existing Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Access the underlying client
    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.client.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        self.client
            .set_with_expiry(key, value, ttl.as_millis() as u64)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> DomainResult<bool> {
        Ok(self.client.delete(key).await?)
    }
}
