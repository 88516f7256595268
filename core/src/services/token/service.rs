//! Main token service implementation

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::User;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Which signing key a token was issued under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Service for issuing, authenticating, and revoking JWT tokens
///
/// Access and refresh tokens are signed with separate secrets so one kind
/// never authenticates as the other. Revocation is tracked per token via
/// the `jti` claim in the shared cache.
pub struct TokenService<C: CacheStore> {
    cache: Arc<C>,
    config: TokenServiceConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl<C: CacheStore> TokenService<C> {
    /// Creates a new token service instance
    pub fn new(cache: Arc<C>, config: TokenServiceConfig) -> Self {
        let access_encoding = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let validation = Validation::new(Algorithm::HS256);

        Self {
            cache,
            config,
            access_encoding,
            access_decoding,
            refresh_encoding,
            refresh_decoding,
            validation,
        }
    }

    /// Issues an access token for the given subject
    pub fn issue_access_token(
        &self,
        sub: String,
        name: String,
        email: String,
    ) -> DomainResult<String> {
        let claims = Claims::new(
            sub,
            name,
            email,
            ChronoDuration::hours(self.config.access_expiry_hours),
        );
        self.encode_jwt(&claims, &self.access_encoding)
    }

    /// Issues a refresh token for the given subject
    pub fn issue_refresh_token(
        &self,
        sub: String,
        name: String,
        email: String,
    ) -> DomainResult<String> {
        let claims = Claims::new(
            sub,
            name,
            email,
            ChronoDuration::days(self.config.refresh_expiry_days),
        );
        self.encode_jwt(&claims, &self.refresh_encoding)
    }

    /// Issues a fresh access/refresh pair for a user.
    ///
    /// Each token carries its own `jti`, so the two can be revoked
    /// independently.
    pub fn issue_token_pair(&self, user: &User) -> DomainResult<TokenPair> {
        let access_token = self.issue_access_token(
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
        )?;
        let refresh_token = self.issue_refresh_token(
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
        )?;

        debug!(event = "token_pair_issued", user_id = %user.id);

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_expiry_seconds(),
            refresh_expires_in: self.config.refresh_expiry_seconds(),
        })
    }

    /// Authenticates a token of the given kind.
    ///
    /// Verifies the signature and expiry, requires a `jti`, and rejects
    /// tokens present on the revocation list.
    ///
    /// # Returns
    /// * `Ok(Claims)` - The token is live
    /// * `Err(TokenError::InvalidToken)` - Bad signature, malformed, or expired
    /// * `Err(TokenError::MissingTokenIdentifier)` - No `jti` claim
    /// * `Err(TokenError::TokenRevoked)` - The token was revoked
    pub async fn authenticate(&self, token: &str, kind: TokenKind) -> DomainResult<Claims> {
        let decoding_key = match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };

        let claims = decode::<Claims>(token, decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|error| {
                debug!(event = "token_rejected", error = %error);
                DomainError::Token(TokenError::InvalidToken)
            })?;

        let blacklist_key = claims
            .blacklist_key()
            .ok_or(DomainError::Token(TokenError::MissingTokenIdentifier))?;

        if self.cache.get(&blacklist_key).await?.is_some() {
            warn!(event = "revoked_token_used", sub = %claims.sub);
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        Ok(claims)
    }

    /// Puts a token on the revocation list.
    ///
    /// Idempotent. Only affects the single token the claims came from.
    pub async fn revoke(&self, claims: &Claims) -> DomainResult<()> {
        let blacklist_key = claims
            .blacklist_key()
            .ok_or(DomainError::Token(TokenError::MissingTokenIdentifier))?;

        let ttl = Duration::from_secs(self.config.revocation_ttl_seconds() as u64);
        self.cache.set(&blacklist_key, "true", ttl).await?;

        info!(event = "token_revoked", sub = %claims.sub);
        Ok(())
    }

    /// Encodes claims into a signed JWT
    fn encode_jwt(&self, claims: &Claims, key: &EncodingKey) -> DomainResult<String> {
        encode(&Header::default(), claims, key).map_err(|error| {
            warn!(event = "token_encoding_failed", error = %error);
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }
}
