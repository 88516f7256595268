//! Cache capability trait used by the service layer
//!
//! Services talk to the cache through [`CacheStore`] so the domain stays
//! free of any concrete backend. The production backend lives in the
//! infrastructure crate; [`InMemoryCacheStore`] covers tests and local
//! development.

pub mod memory;

pub use memory::InMemoryCacheStore;

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainResult;

/// Trait for key-value cache integration
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key` with the given time-to-live
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()>;

    /// Remove `key`, returning whether it existed
    async fn delete(&self, key: &str) -> DomainResult<bool>;
}
