//! Error type definitions for authentication, token, and OTP operations
//!
//! These enums enumerate the distinguishable failure kinds the services
//! surface. Human-facing wording and status mapping belong to the
//! presentation layer.

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Email already exists")]
    EmailExists,

    #[error("Invalid old password")]
    InvalidOldPassword,

    #[error("Account has no password set")]
    NoPasswordSet,

    #[error("Account already has a password")]
    PasswordAlreadySet,

    #[error("User not found")]
    UserNotFound,
}

/// Token validation and revocation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token is missing its unique identifier")]
    MissingTokenIdentifier,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// One-time password errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP already sent")]
    OtpAlreadySent,

    #[error("Too many attempts")]
    TooManyAttempts,

    #[error("OTP not found")]
    OtpNotFound,

    #[error("Invalid OTP")]
    InvalidOtp,
}
