//! User profile value object for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User;

/// Public view of a user account.
///
/// Mirrors the `User` entity minus the password hash, which never leaves
/// the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Timestamp when the email address was verified
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            email_verified_at: user.email_verified_at,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_excludes_password_hash() {
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            Some("hash".to_string()),
        );

        let profile = UserProfile::from(&user);
        let json = serde_json::to_string(&profile).unwrap();

        assert_eq!(profile.id, user.id);
        assert_eq!(profile.email, user.email);
        assert!(!json.contains("hash"));
        assert!(!json.contains("password"));
    }
}
