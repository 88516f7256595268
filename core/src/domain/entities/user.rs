//! User entity representing a registered account in the Authkit system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across accounts
    pub email: String,

    /// Bcrypt password hash, absent for OAuth-only accounts
    pub password_hash: Option<String>,

    /// Timestamp when the email address was verified
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(name: String, email: String, password_hash: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            email_verified_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a User from an OAuth provider profile.
    ///
    /// OAuth providers vouch for the email address, so the account starts
    /// verified with a login stamp and no local password.
    pub fn from_oauth(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: None,
            email_verified_at: Some(now),
            last_login_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the user's email address has been verified
    pub fn is_email_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Marks the email address as verified
    pub fn mark_email_verified(&mut self) {
        self.email_verified_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password(&mut self, password_hash: String) {
        self.password_hash = Some(password_hash);
        self.updated_at = Utc::now();
    }

    /// Checks if the account has a local password
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
