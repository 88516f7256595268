//! Authentication service module
//!
//! This module provides the account lifecycle:
//! - Registration and password sign-in
//! - Email verification via one-time passwords
//! - OAuth sign-in with upsert-by-email
//! - Token refresh and sign-out
//! - Password set, change, and reset flows

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
