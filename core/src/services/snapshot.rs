//! Read-through cache of user snapshots
//!
//! Mutating flows hit the primary store and keep the snapshot fresh;
//! read paths go through [`UserSnapshotCache::get_or_load`]. The database
//! row stays authoritative, so cache failures after a successful write
//! are logged and swallowed rather than surfaced to the caller.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::cache::CacheStore;
use crate::domain::entities::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Key prefix for cached user snapshots
const SNAPSHOT_KEY_PREFIX: &str = "user";

/// Cache of serialized [`User`] snapshots keyed by user id
pub struct UserSnapshotCache<C: CacheStore> {
    cache: Arc<C>,
    ttl: Duration,
}

impl<C: CacheStore> UserSnapshotCache<C> {
    /// Creates a snapshot cache writing entries with the given time-to-live
    pub fn new(cache: Arc<C>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Builds the cache key for a user id
    pub fn key(id: Uuid) -> String {
        format!("{SNAPSHOT_KEY_PREFIX}:{id}")
    }

    /// Fetch a user, preferring the snapshot over the repository.
    ///
    /// A hit that fails to deserialize falls back to the repository.
    /// Returns [`AuthError::UserNotFound`] when neither source has the user.
    pub async fn get_or_load<U: UserRepository>(
        &self,
        repository: &U,
        id: Uuid,
    ) -> DomainResult<User> {
        let key = Self::key(id);

        if let Some(cached) = self.cache.get(&key).await? {
            match serde_json::from_str::<User>(&cached) {
                Ok(user) => return Ok(user),
                Err(error) => {
                    warn!(
                        event = "user_snapshot_corrupt",
                        user_id = %id,
                        error = %error,
                        "discarding unreadable user snapshot"
                    );
                }
            }
        }

        let user = repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                warn!(event = "user_snapshot_subject_missing", user_id = %id);
                DomainError::Auth(AuthError::UserNotFound)
            })?;

        self.store(&user).await;
        Ok(user)
    }

    /// Write a snapshot for the given user.
    ///
    /// Failures are logged and swallowed.
    pub async fn store(&self, user: &User) {
        let key = Self::key(user.id);
        let payload = match serde_json::to_string(user) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(
                    event = "user_snapshot_encode_failed",
                    user_id = %user.id,
                    error = %error,
                    "failed to serialize user snapshot"
                );
                return;
            }
        };

        if let Err(error) = self.cache.set(&key, &payload, self.ttl).await {
            warn!(
                event = "user_snapshot_store_failed",
                user_id = %user.id,
                error = %error,
                "failed to refresh user snapshot"
            );
        }
    }

    /// Drop the snapshot for a user id
    pub async fn invalidate(&self, id: Uuid) -> DomainResult<()> {
        self.cache.delete(&Self::key(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheStore;
    use crate::repositories::MockUserRepository;

    fn snapshot_cache(cache: Arc<InMemoryCacheStore>) -> UserSnapshotCache<InMemoryCacheStore> {
        UserSnapshotCache::new(cache, Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn test_get_or_load_falls_back_to_repository() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let snapshots = snapshot_cache(cache.clone());
        let repo = MockUserRepository::new();

        let user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
        repo.create(user.clone()).await.unwrap();

        let loaded = snapshots.get_or_load(&repo, user.id).await.unwrap();
        assert_eq!(loaded.id, user.id);

        // Loading should have warmed the cache
        let cached = cache
            .get(&UserSnapshotCache::<InMemoryCacheStore>::key(user.id))
            .await
            .unwrap();
        assert!(cached.is_some());
    }

    #[tokio::test]
    async fn test_get_or_load_prefers_snapshot() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let snapshots = snapshot_cache(cache.clone());
        let repo = MockUserRepository::new();

        // Not persisted in the repository at all
        let user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
        snapshots.store(&user).await;

        let loaded = snapshots.get_or_load(&repo, user.id).await.unwrap();
        assert_eq!(loaded.email, user.email);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let snapshots = snapshot_cache(cache.clone());
        let repo = MockUserRepository::new();

        let user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
        repo.create(user.clone()).await.unwrap();

        cache
            .set(
                &UserSnapshotCache::<InMemoryCacheStore>::key(user.id),
                "not json",
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let loaded = snapshots.get_or_load(&repo, user.id).await.unwrap();
        assert_eq!(loaded.id, user.id);
    }

    #[tokio::test]
    async fn test_missing_everywhere_is_not_found() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let snapshots = snapshot_cache(cache);
        let repo = MockUserRepository::new();

        let result = snapshots.get_or_load(&repo, Uuid::new_v4()).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::UserNotFound))
        ));
    }

    #[tokio::test]
    async fn test_invalidate_removes_snapshot() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let snapshots = snapshot_cache(cache.clone());

        let user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
        snapshots.store(&user).await;
        snapshots.invalidate(user.id).await.unwrap();

        let cached = cache
            .get(&UserSnapshotCache::<InMemoryCacheStore>::key(user.id))
            .await
            .unwrap();
        assert!(cached.is_none());
    }
}
