//! One-time password entity for email verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the one-time password
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for one-time passwords (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Maximum number of send attempts within one expiry window
pub const MAX_SEND_ATTEMPTS: i64 = 3;

/// One-time password entity for email verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier for the one-time password
    pub id: Uuid,

    /// Email address this code was sent to
    pub email: String,

    /// The 6-digit code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    /// Creates a new one-time password with a cryptographically secure
    /// random 6-digit code
    pub fn new(email: String) -> Self {
        Self::new_with_expiration(email, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new one-time password with a custom expiration time
    pub fn new_with_expiration(email: String, expiration_minutes: i64) -> Self {
        let code = Self::generate_code();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(expiration_minutes);

        Self {
            id: Uuid::new_v4(),
            email,
            code,
            created_at: now,
            expires_at,
        }
    }

    /// Generates a cryptographically secure random 6-digit code
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Checks if the one-time password has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Verifies a submitted code against this one-time password.
    ///
    /// Uses constant-time comparison so timing does not leak how many
    /// leading digits matched.
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }
}
