//! # Authkit Core
//!
//! Core business logic and domain layer for the Authkit backend.
//! This crate contains domain entities, business services, the persistence
//! and cache capability traits, and the error types that form the foundation
//! of the application architecture.

pub mod cache;
pub mod domain;
pub mod errors;
pub mod mail;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use cache::CacheStore;
pub use domain::*;
pub use errors::*;
pub use mail::{MailDispatcher, MailMessage};
pub use repositories::*;
pub use services::*;
