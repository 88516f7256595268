//! Business services containing domain logic and use cases.

pub mod auth;
pub mod otp;
pub mod snapshot;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use otp::{OtpService, OtpServiceConfig, SendOtpResult};
pub use snapshot::UserSnapshotCache;
pub use token::{TokenKind, TokenService, TokenServiceConfig};
pub use user::{UpdateProfileRequest, UserService};
