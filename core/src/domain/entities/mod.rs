//! Domain entities

pub mod otp;
pub mod token;
pub mod user;

pub use otp::{OtpCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_SEND_ATTEMPTS};
pub use token::{Claims, TokenPair};
pub use user::User;
