//! OAuth provider profile value object.

use serde::{Deserialize, Serialize};

/// Identity asserted by an external OAuth provider.
///
/// Only the fields the sign-in flow needs are kept; provider-specific
/// payloads are reduced to this shape at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthProfile {
    /// Email address verified by the provider
    pub email: String,

    /// Display name reported by the provider
    pub name: String,
}

impl OAuthProfile {
    /// Creates a new OAuth profile
    pub fn new(email: String, name: String) -> Self {
        Self { email, name }
    }
}
