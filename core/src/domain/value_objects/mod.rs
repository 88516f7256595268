//! Value objects representing immutable domain concepts.

pub mod oauth_profile;
pub mod user_profile;

// Re-export commonly used types
pub use oauth_profile::OAuthProfile;
pub use user_profile::UserProfile;
