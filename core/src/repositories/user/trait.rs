//! User repository trait defining the interface for user data persistence.
//!
//! This module defines the repository pattern interface for User entities.
//! The trait is async-first and uses Result types for proper error handling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// This trait defines the contract for data access operations related to
/// users. Implementations handle the actual database operations while
/// maintaining the abstraction boundary between domain and infrastructure
/// layers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address
    ///
    /// # Arguments
    /// * `email` - Normalized (lowercased, trimmed) email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Check whether any account uses the given email address
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - The email is taken or the write failed
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user by id
    ///
    /// # Returns
    /// * `Ok(true)` - A row was deleted
    /// * `Ok(false)` - No user with that id existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
