//! Main one-time password service implementation

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use ak_shared::utils::validation::{is_valid_email, normalize_email};

use crate::cache::CacheStore;
use crate::domain::entities::OtpCode;
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::mail::{otp_email, MailDispatcher};

use super::config::OtpServiceConfig;
use super::types::SendOtpResult;

/// Key prefix for outstanding codes
const CODE_KEY_PREFIX: &str = "otp:code";

/// Key prefix for per-address send counters
const ATTEMPTS_KEY_PREFIX: &str = "otp:attempts";

/// Service for sending and verifying email one-time passwords
///
/// Codes and send counters live in the cache under the address they were
/// issued for, both expiring together after the configured window.
pub struct OtpService<C: CacheStore, M: MailDispatcher> {
    cache: Arc<C>,
    mailer: Arc<M>,
    config: OtpServiceConfig,
}

impl<C: CacheStore, M: MailDispatcher> OtpService<C, M> {
    /// Create a new one-time password service
    pub fn new(cache: Arc<C>, mailer: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            cache,
            mailer,
            config,
        }
    }

    fn code_key(email: &str) -> String {
        format!("{CODE_KEY_PREFIX}:{email}")
    }

    fn attempts_key(email: &str) -> String {
        format!("{ATTEMPTS_KEY_PREFIX}:{email}")
    }

    fn window(&self) -> Duration {
        Duration::from_secs((self.config.code_expiry_minutes * 60) as u64)
    }

    /// Generate a code for `email` and queue it for delivery.
    ///
    /// While a code is outstanding a plain send is refused; callers must
    /// pass `retry = true` to replace it. Each send counts against the
    /// per-address limit until the window expires.
    ///
    /// # Returns
    /// * `Ok(SendOtpResult)` - The code was generated and queued
    /// * `Err(OtpError::OtpAlreadySent)` - A code is outstanding and `retry` is false
    /// * `Err(OtpError::TooManyAttempts)` - The address used up its sends
    pub async fn send_code(&self, email: &str, retry: bool) -> DomainResult<SendOtpResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: format!("Invalid email address: {}", email),
            });
        }

        let code_key = Self::code_key(&email);
        let attempts_key = Self::attempts_key(&email);

        if self.cache.get(&code_key).await?.is_some() && !retry {
            warn!(event = "otp_already_sent", email = %email);
            return Err(DomainError::Otp(OtpError::OtpAlreadySent));
        }

        let attempts = match self.cache.get(&attempts_key).await? {
            Some(raw) => raw.parse::<i64>().unwrap_or(0),
            None => 0,
        };
        if attempts > self.config.max_send_attempts {
            warn!(event = "otp_send_limit_reached", email = %email, attempts);
            return Err(DomainError::Otp(OtpError::TooManyAttempts));
        }

        let code = OtpCode::new_with_expiration(email.clone(), self.config.code_expiry_minutes);

        self.mailer.enqueue(otp_email(&email, &code.code)).await?;

        let window = self.window();
        self.cache.set(&code_key, &code.code, window).await?;
        self.cache
            .set(&attempts_key, &(attempts + 1).to_string(), window)
            .await?;

        info!(event = "otp_sent", email = %email, attempt = attempts + 1);

        Ok(SendOtpResult {
            code,
            attempts: attempts + 1,
        })
    }

    /// Verify a submitted code for `email`.
    ///
    /// A correct code is consumed together with its send counter, so the
    /// next send starts a fresh window.
    ///
    /// # Returns
    /// * `Ok(())` - The code matched and was consumed
    /// * `Err(OtpError::OtpNotFound)` - No outstanding code for the address
    /// * `Err(OtpError::InvalidOtp)` - The submitted code did not match
    pub async fn verify_code(&self, email: &str, submitted: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let code_key = Self::code_key(&email);

        let stored = self
            .cache
            .get(&code_key)
            .await?
            .ok_or_else(|| {
                warn!(event = "otp_not_found", email = %email);
                DomainError::Otp(OtpError::OtpNotFound)
            })?;

        if !constant_time_eq::constant_time_eq(stored.as_bytes(), submitted.as_bytes()) {
            warn!(event = "otp_mismatch", email = %email);
            return Err(DomainError::Otp(OtpError::InvalidOtp));
        }

        self.cache.delete(&code_key).await?;
        self.cache.delete(&Self::attempts_key(&email)).await?;

        info!(event = "otp_verified", email = %email);
        Ok(())
    }
}
