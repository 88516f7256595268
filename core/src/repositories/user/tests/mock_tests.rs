//! Unit tests for mock user repository

use crate::domain::entities::User;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();

    let user = User::new(
        "Ada".to_string(),
        "ada@example.com".to_string(),
        Some("hash".to_string()),
    );

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let found = repo.find_by_id(user.id).await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, user.id);
}

#[tokio::test]
async fn test_mock_repository_find_by_email() {
    let repo = MockUserRepository::new();

    let user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
    repo.create(user.clone()).await.unwrap();

    let found = repo.find_by_email("ada@example.com").await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().id, user.id);

    let missing = repo.find_by_email("nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_mock_repository_duplicate_email() {
    let repo = MockUserRepository::new();

    let user1 = User::new("Ada".to_string(), "same@example.com".to_string(), None);
    let user2 = User::new("Eve".to_string(), "same@example.com".to_string(), None);

    repo.create(user1).await.unwrap();
    let result = repo.create(user2).await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_mock_repository_exists_by_email() {
    let repo = MockUserRepository::new();

    let user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
    repo.create(user).await.unwrap();

    assert!(repo.exists_by_email("ada@example.com").await.unwrap());
    assert!(!repo.exists_by_email("nobody@example.com").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_update() {
    let repo = MockUserRepository::new();

    let mut user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
    repo.create(user.clone()).await.unwrap();

    user.name = "Ada Lovelace".to_string();
    let updated = repo.update(user.clone()).await.unwrap();
    assert_eq!(updated.name, "Ada Lovelace");

    let stranger = User::new("Eve".to_string(), "eve@example.com".to_string(), None);
    let result = repo.update(stranger).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_mock_repository_delete() {
    let repo = MockUserRepository::new();

    let user = User::new("Ada".to_string(), "ada@example.com".to_string(), None);
    repo.create(user.clone()).await.unwrap();

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap());
    assert!(repo.find_by_id(user.id).await.unwrap().is_none());
}
