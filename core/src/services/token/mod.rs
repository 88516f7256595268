//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token issuance with per-token identifiers
//! - Token authentication against the revocation list
//! - Token revocation

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{TokenKind, TokenService};
