//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use ak_shared::utils::validation::{
    is_valid_email, is_valid_password, normalize_email, MIN_PASSWORD_LENGTH,
};

use crate::cache::CacheStore;
use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::User;
use crate::domain::value_objects::OAuthProfile;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::mail::MailDispatcher;
use crate::repositories::UserRepository;
use crate::services::otp::{OtpService, SendOtpResult};
use crate::services::snapshot::UserSnapshotCache;
use crate::services::token::{TokenKind, TokenService};

use super::config::AuthServiceConfig;

/// Authentication service for managing the account lifecycle
pub struct AuthService<U, C, M>
where
    U: UserRepository,
    C: CacheStore,
    M: MailDispatcher,
{
    /// User repository for database operations
    users: Arc<U>,
    /// Token service for JWT management
    tokens: Arc<TokenService<C>>,
    /// One-time password service for email verification
    otp: Arc<OtpService<C, M>>,
    /// Cached user snapshots
    snapshot: UserSnapshotCache<C>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, C, M> AuthService<U, C, M>
where
    U: UserRepository,
    C: CacheStore,
    M: MailDispatcher,
{
    /// Create a new authentication service
    pub fn new(
        users: Arc<U>,
        tokens: Arc<TokenService<C>>,
        otp: Arc<OtpService<C, M>>,
        snapshot: UserSnapshotCache<C>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            otp,
            snapshot,
            config,
        }
    }

    /// Register a new account.
    ///
    /// The account starts unverified and no tokens are issued; the caller
    /// proceeds through email verification before signing in.
    ///
    /// # Returns
    /// * `Ok(User)` - The created account
    /// * `Err(AuthError::EmailExists)` - The address is already registered
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> DomainResult<User> {
        let email = self.validated_email(email)?;
        self.validated_password(password)?;

        if self.users.exists_by_email(&email).await? {
            warn!(event = "sign_up_duplicate_email", email = %email);
            return Err(DomainError::Auth(AuthError::EmailExists));
        }

        let password_hash = self.hash_password(password)?;
        let user = self
            .users
            .create(User::new(name.to_string(), email.clone(), Some(password_hash)))
            .await?;

        info!(event = "user_registered", user_id = %user.id);
        Ok(user)
    }

    /// Authenticate with email and password.
    ///
    /// Absent accounts, passwordless accounts, and wrong passwords all map
    /// to `InvalidCredentials` so the response does not reveal which one it
    /// was. Verified accounts get a login stamp, a fresh snapshot, and a
    /// token pair.
    ///
    /// # Returns
    /// * `Ok(TokenPair)` - Authentication succeeded
    /// * `Err(AuthError::InvalidCredentials)` - Unknown account or bad password
    /// * `Err(AuthError::EmailNotVerified)` - Correct password but unverified email
    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let email = normalize_email(email);

        let mut user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!(event = "sign_in_unknown_email", email = %email);
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        let password_hash = match user.password_hash.as_deref() {
            Some(hash) => hash,
            None => {
                warn!(event = "sign_in_passwordless_account", user_id = %user.id);
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        if !self.verify_password(password, password_hash)? {
            warn!(event = "sign_in_bad_password", user_id = %user.id);
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if !user.is_email_verified() {
            warn!(event = "sign_in_unverified_email", user_id = %user.id);
            return Err(DomainError::Auth(AuthError::EmailNotVerified));
        }

        user.record_login();
        let user = self.users.update(user).await?;

        let pair = self.tokens.issue_token_pair(&user)?;
        self.snapshot.store(&user).await;

        info!(event = "user_signed_in", user_id = %user.id);
        Ok(pair)
    }

    /// Mint a fresh access token from authenticated refresh claims.
    ///
    /// The subject must still exist; tokens for deleted accounts die at
    /// their next refresh.
    pub async fn refresh_access_token(&self, claims: &Claims) -> DomainResult<String> {
        let user_id = self.subject_id(claims)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            warn!(event = "refresh_for_missing_user", user_id = %user_id);
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        let access_token = self.tokens.issue_access_token(
            claims.sub.clone(),
            claims.name.clone(),
            claims.email.clone(),
        )?;

        info!(event = "access_token_refreshed", user_id = %user_id);
        Ok(access_token)
    }

    /// Revoke the presented token and drop the subject's snapshot.
    pub async fn sign_out(&self, claims: &Claims) -> DomainResult<()> {
        if claims.jti.is_none() {
            return Err(DomainError::Token(TokenError::MissingTokenIdentifier));
        }

        let user_id = self.subject_id(claims)?;
        let user = self.snapshot.get_or_load(self.users.as_ref(), user_id).await?;

        self.tokens.revoke(claims).await?;
        self.snapshot.invalidate(user.id).await?;

        info!(event = "user_signed_out", user_id = %user.id);
        Ok(())
    }

    /// Send (or resend) a verification code to an email address
    pub async fn send_verification_code(
        &self,
        email: &str,
        retry: bool,
    ) -> DomainResult<SendOtpResult> {
        self.otp.send_code(email, retry).await
    }

    /// Verify an email address with a one-time password.
    ///
    /// A correct code is consumed even if the account lookup then fails.
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<User> {
        let email = normalize_email(email);

        self.otp.verify_code(&email, code).await?;

        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(event = "verify_email_unknown_account", email = %email);
                DomainError::Auth(AuthError::UserNotFound)
            })?;

        user.mark_email_verified();
        let user = self.users.update(user).await?;
        self.snapshot.store(&user).await;

        info!(event = "email_verified", user_id = %user.id);
        Ok(user)
    }

    /// Sign in with an identity asserted by an OAuth provider.
    ///
    /// Upserts by email: unknown addresses get a fresh verified account,
    /// known ones have their name, verification, and login stamp updated.
    /// Never touches the password.
    pub async fn oauth_sign_in(&self, profile: OAuthProfile) -> DomainResult<(User, TokenPair)> {
        let email = self.validated_email(&profile.email)?;

        let user = match self.users.find_by_email(&email).await? {
            Some(mut user) => {
                user.name = profile.name;
                if !user.is_email_verified() {
                    user.mark_email_verified();
                }
                user.record_login();
                self.users.update(user).await?
            }
            None => {
                let user = User::from_oauth(profile.name, email.clone());
                self.users.create(user).await?
            }
        };

        self.snapshot.store(&user).await;
        let pair = self.tokens.issue_token_pair(&user)?;

        info!(event = "oauth_signed_in", user_id = %user.id);
        Ok((user, pair))
    }

    /// Give a passwordless (OAuth-only) account a local password.
    ///
    /// # Returns
    /// * `Err(AuthError::UserNotFound)` - Unknown address
    /// * `Err(AuthError::PasswordAlreadySet)` - The account already has one
    pub async fn set_password(&self, email: &str, new_password: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        self.validated_password(new_password)?;

        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(event = "set_password_unknown_account", email = %email);
                DomainError::Auth(AuthError::UserNotFound)
            })?;

        if user.has_password() {
            warn!(event = "set_password_already_set", user_id = %user.id);
            return Err(DomainError::Auth(AuthError::PasswordAlreadySet));
        }

        let password_hash = self.hash_password(new_password)?;
        user.set_password(password_hash);
        let user = self.users.update(user).await?;
        self.snapshot.invalidate(user.id).await?;

        info!(event = "password_set", user_id = %user.id);
        Ok(())
    }

    /// Change the password of an account that has one.
    ///
    /// # Returns
    /// * `Err(AuthError::UserNotFound)` - Unknown account
    /// * `Err(AuthError::NoPasswordSet)` - OAuth-only account
    /// * `Err(AuthError::InvalidOldPassword)` - Old password mismatch
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut user = self.snapshot.get_or_load(self.users.as_ref(), user_id).await?;

        let current_hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| {
                warn!(event = "change_password_no_password", user_id = %user.id);
                DomainError::Auth(AuthError::NoPasswordSet)
            })?;

        if !self.verify_password(old_password, current_hash)? {
            warn!(event = "change_password_bad_old", user_id = %user.id);
            return Err(DomainError::Auth(AuthError::InvalidOldPassword));
        }

        self.validated_password(new_password)?;

        let password_hash = self.hash_password(new_password)?;
        user.set_password(password_hash);
        let user = self.users.update(user).await?;

        self.snapshot.invalidate(user.id).await?;
        self.snapshot.store(&user).await;

        info!(event = "password_changed", user_id = %user.id);
        Ok(())
    }

    /// Reset a forgotten password after proving control of the inbox.
    pub async fn forgot_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let email = normalize_email(email);

        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(event = "forgot_password_unknown_account", email = %email);
                DomainError::Auth(AuthError::UserNotFound)
            })?;

        self.otp.verify_code(&email, code).await?;
        self.validated_password(new_password)?;

        let password_hash = self.hash_password(new_password)?;
        user.set_password(password_hash);
        let user = self.users.update(user).await?;
        self.snapshot.invalidate(user.id).await?;

        info!(event = "password_reset", user_id = %user.id);
        Ok(())
    }

    fn validated_email(&self, email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: format!("Invalid email address: {}", email),
            });
        }
        Ok(email)
    }

    fn validated_password(&self, password: &str) -> DomainResult<()> {
        if !is_valid_password(password) {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters long",
                    MIN_PASSWORD_LENGTH
                ),
            });
        }
        Ok(())
    }

    fn subject_id(&self, claims: &Claims) -> DomainResult<Uuid> {
        claims.user_id().map_err(|_| DomainError::Validation {
            message: "Token subject is not a valid user id".to_string(),
        })
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|error| {
            warn!(event = "password_hash_failed", error = %error);
            DomainError::Internal {
                message: "Failed to hash password".to_string(),
            }
        })
    }

    fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash).map_err(|error| {
            warn!(event = "password_verify_failed", error = %error);
            DomainError::Internal {
                message: "Failed to verify password".to_string(),
            }
        })
    }

    /// Authenticate a bearer token of the given kind
    pub async fn authenticate(&self, token: &str, kind: TokenKind) -> DomainResult<Claims> {
        self.tokens.authenticate(token, kind).await
    }
}
