//! In-memory cache store for tests and local development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::CacheStore;
use crate::errors::DomainResult;

/// Process-local [`CacheStore`] backed by a HashMap.
///
/// Entries are evicted lazily when read after their deadline.
pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
}

impl InMemoryCacheStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, deadline)) if Instant::now() < *deadline => {
                    return Ok(Some(value.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Entry was present but expired
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> DomainResult<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(key).is_some())
    }
}
