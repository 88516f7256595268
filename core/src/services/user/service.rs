//! Main user profile service implementation

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::cache::CacheStore;
use crate::domain::entities::token::Claims;
use crate::domain::value_objects::UserProfile;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;
use crate::services::snapshot::UserSnapshotCache;
use crate::services::token::TokenService;

/// Fields a user may change on their own profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name, unchanged when absent
    pub name: Option<String>,
}

/// Service for reading and maintaining user profiles
pub struct UserService<U, C>
where
    U: UserRepository,
    C: CacheStore,
{
    /// User repository for database operations
    users: Arc<U>,
    /// Token service for revoking credentials on account deletion
    tokens: Arc<TokenService<C>>,
    /// Cached user snapshots
    snapshot: UserSnapshotCache<C>,
}

impl<U, C> UserService<U, C>
where
    U: UserRepository,
    C: CacheStore,
{
    /// Create a new user service
    pub fn new(
        users: Arc<U>,
        tokens: Arc<TokenService<C>>,
        snapshot: UserSnapshotCache<C>,
    ) -> Self {
        Self {
            users,
            tokens,
            snapshot,
        }
    }

    /// Fetch a user's profile, preferring the snapshot cache
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        let user = self.snapshot.get_or_load(self.users.as_ref(), user_id).await?;
        Ok(UserProfile::from(&user))
    }

    /// Apply profile changes and refresh the snapshot
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> DomainResult<UserProfile> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if let Some(name) = request.name {
            user.name = name;
        }

        let user = self.users.update(user).await?;
        self.snapshot.store(&user).await;

        info!(event = "profile_updated", user_id = %user.id);
        Ok(UserProfile::from(&user))
    }

    /// Delete the subject's account.
    ///
    /// Removes the row and the snapshot, then revokes the presented token
    /// so it cannot keep authenticating against stale state. The claims
    /// must carry a `jti` before anything is touched; a row must never go
    /// away under a token that cannot be revoked afterwards.
    pub async fn delete_account(&self, claims: &Claims) -> DomainResult<()> {
        if claims.jti.is_none() {
            return Err(DomainError::Token(TokenError::MissingTokenIdentifier));
        }

        let user_id = claims.user_id().map_err(|_| DomainError::Validation {
            message: "Token subject is not a valid user id".to_string(),
        })?;

        let deleted = self.users.delete(user_id).await?;
        if !deleted {
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        self.snapshot.invalidate(user_id).await?;
        self.tokens.revoke(claims).await?;

        info!(event = "account_deleted", user_id = %user_id);
        Ok(())
    }
}
