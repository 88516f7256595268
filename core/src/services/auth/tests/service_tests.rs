//! Unit tests for the authentication service

use uuid::Uuid;

use crate::domain::entities::User;
use crate::domain::value_objects::OAuthProfile;
use crate::errors::{AuthError, DomainError, OtpError, TokenError};
use crate::repositories::UserRepository;
use crate::services::token::TokenKind;

use super::mocks::{context, TestContext};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "correct-horse";

/// Registers and verifies an account, returning the context
async fn verified_account() -> TestContext {
    let ctx = context();

    ctx.service.sign_up("Ada", EMAIL, PASSWORD).await.unwrap();
    let sent = ctx.service.send_verification_code(EMAIL, false).await.unwrap();
    ctx.service.verify_email(EMAIL, &sent.code.code).await.unwrap();

    ctx
}

#[tokio::test]
async fn test_sign_up_creates_unverified_account() {
    let ctx = context();

    let user = ctx.service.sign_up("Ada", EMAIL, PASSWORD).await.unwrap();

    assert_eq!(user.email, EMAIL);
    assert!(!user.is_email_verified());
    assert!(user.has_password());
    // Stored hash is not the raw password
    assert_ne!(user.password_hash.as_deref(), Some(PASSWORD));
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let ctx = context();

    ctx.service.sign_up("Ada", EMAIL, PASSWORD).await.unwrap();
    let result = ctx.service.sign_up("Eve", EMAIL, PASSWORD).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailExists))
    ));
}

#[tokio::test]
async fn test_sign_up_rejects_bad_input() {
    let ctx = context();

    let result = ctx.service.sign_up("Ada", "not-an-email", PASSWORD).await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));

    let result = ctx.service.sign_up("Ada", EMAIL, "short").await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_sign_in_unknown_email() {
    let ctx = context();

    let result = ctx.service.sign_in(EMAIL, PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let ctx = verified_account().await;

    let result = ctx.service.sign_in(EMAIL, "wrong-password").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_sign_in_unverified_email() {
    let ctx = context();

    ctx.service.sign_up("Ada", EMAIL, PASSWORD).await.unwrap();
    let result = ctx.service.sign_in(EMAIL, PASSWORD).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailNotVerified))
    ));
}

#[tokio::test]
async fn test_sign_in_passwordless_account() {
    let ctx = context();

    ctx.users
        .create(User::from_oauth("Ada".to_string(), EMAIL.to_string()))
        .await
        .unwrap();

    let result = ctx.service.sign_in(EMAIL, PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_full_sign_in_flow() {
    let ctx = verified_account().await;

    let pair = ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();

    // Both tokens authenticate with their own kind
    let access = ctx
        .tokens
        .authenticate(&pair.access_token, TokenKind::Access)
        .await
        .unwrap();
    ctx.tokens
        .authenticate(&pair.refresh_token, TokenKind::Refresh)
        .await
        .unwrap();

    // The login stamp was persisted
    let user = ctx
        .users
        .find_by_email(EMAIL)
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_login_at.is_some());
    assert_eq!(access.sub, user.id.to_string());
}

#[tokio::test]
async fn test_verify_email_consumes_code() {
    let ctx = context();

    ctx.service.sign_up("Ada", EMAIL, PASSWORD).await.unwrap();
    let sent = ctx.service.send_verification_code(EMAIL, false).await.unwrap();
    ctx.service.verify_email(EMAIL, &sent.code.code).await.unwrap();

    let result = ctx.service.verify_email(EMAIL, &sent.code.code).await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::OtpNotFound))
    ));
}

#[tokio::test]
async fn test_verify_email_unknown_account() {
    let ctx = context();

    let sent = ctx.service.send_verification_code(EMAIL, false).await.unwrap();
    let result = ctx.service.verify_email(EMAIL, &sent.code.code).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_verification_mail_is_enqueued() {
    let ctx = context();

    ctx.service.sign_up("Ada", EMAIL, PASSWORD).await.unwrap();
    let sent = ctx.service.send_verification_code(EMAIL, false).await.unwrap();

    let mails = ctx.mailer.sent.lock().await;
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, EMAIL);
    assert!(mails[0].text.contains(&sent.code.code));
}

#[tokio::test]
async fn test_refresh_access_token() {
    let ctx = verified_account().await;

    let pair = ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();
    let refresh_claims = ctx
        .tokens
        .authenticate(&pair.refresh_token, TokenKind::Refresh)
        .await
        .unwrap();

    let access = ctx
        .service
        .refresh_access_token(&refresh_claims)
        .await
        .unwrap();

    let claims = ctx
        .tokens
        .authenticate(&access, TokenKind::Access)
        .await
        .unwrap();
    assert_eq!(claims.sub, refresh_claims.sub);
    // A fresh token, not a replay
    assert_ne!(claims.jti, refresh_claims.jti);
}

#[tokio::test]
async fn test_refresh_for_deleted_user() {
    let ctx = verified_account().await;

    let pair = ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();
    let refresh_claims = ctx
        .tokens
        .authenticate(&pair.refresh_token, TokenKind::Refresh)
        .await
        .unwrap();

    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    ctx.users.delete(user.id).await.unwrap();

    let result = ctx.service.refresh_access_token(&refresh_claims).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_sign_out_revokes_presented_token() {
    let ctx = verified_account().await;

    let pair = ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();
    let refresh_claims = ctx
        .tokens
        .authenticate(&pair.refresh_token, TokenKind::Refresh)
        .await
        .unwrap();

    ctx.service.sign_out(&refresh_claims).await.unwrap();

    let result = ctx
        .tokens
        .authenticate(&pair.refresh_token, TokenKind::Refresh)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));

    // The sibling access token from the same sign-in stays live
    assert!(ctx
        .tokens
        .authenticate(&pair.access_token, TokenKind::Access)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_sign_out_requires_token_identifier() {
    let ctx = verified_account().await;

    let pair = ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();
    let mut claims = ctx
        .tokens
        .authenticate(&pair.refresh_token, TokenKind::Refresh)
        .await
        .unwrap();
    claims.jti = None;

    let result = ctx.service.sign_out(&claims).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::MissingTokenIdentifier))
    ));
}

#[tokio::test]
async fn test_oauth_sign_in_creates_verified_account() {
    let ctx = context();

    let profile = OAuthProfile::new(EMAIL.to_string(), "Ada".to_string());
    let (user, pair) = ctx.service.oauth_sign_in(profile).await.unwrap();

    assert!(user.is_email_verified());
    assert!(user.last_login_at.is_some());
    assert!(!user.has_password());

    ctx.tokens
        .authenticate(&pair.access_token, TokenKind::Access)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_oauth_sign_in_updates_existing_account() {
    let ctx = context();

    ctx.service.sign_up("Ada", EMAIL, PASSWORD).await.unwrap();

    let profile = OAuthProfile::new(EMAIL.to_string(), "Ada Lovelace".to_string());
    let (user, _pair) = ctx.service.oauth_sign_in(profile).await.unwrap();

    assert_eq!(user.name, "Ada Lovelace");
    assert!(user.is_email_verified());
    // The local password survives the OAuth upsert
    assert!(user.has_password());
}

#[tokio::test]
async fn test_set_password_on_oauth_account() {
    let ctx = context();

    let profile = OAuthProfile::new(EMAIL.to_string(), "Ada".to_string());
    ctx.service.oauth_sign_in(profile).await.unwrap();

    ctx.service.set_password(EMAIL, PASSWORD).await.unwrap();

    // The account now signs in with the password
    ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();

    let result = ctx.service.set_password(EMAIL, "another-one").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PasswordAlreadySet))
    ));
}

#[tokio::test]
async fn test_set_password_unknown_account() {
    let ctx = context();

    let result = ctx.service.set_password(EMAIL, PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_change_password() {
    let ctx = verified_account().await;
    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();

    ctx.service
        .change_password(user.id, PASSWORD, "new-password-1")
        .await
        .unwrap();

    let result = ctx.service.sign_in(EMAIL, PASSWORD).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));

    ctx.service.sign_in(EMAIL, "new-password-1").await.unwrap();
}

#[tokio::test]
async fn test_change_password_wrong_old() {
    let ctx = verified_account().await;
    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();

    let result = ctx
        .service
        .change_password(user.id, "wrong-old", "new-password-1")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidOldPassword))
    ));
}

#[tokio::test]
async fn test_change_password_without_password() {
    let ctx = context();

    let profile = OAuthProfile::new(EMAIL.to_string(), "Ada".to_string());
    let (user, _) = ctx.service.oauth_sign_in(profile).await.unwrap();

    let result = ctx
        .service
        .change_password(user.id, PASSWORD, "new-password-1")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::NoPasswordSet))
    ));
}

#[tokio::test]
async fn test_change_password_unknown_user() {
    let ctx = context();

    let result = ctx
        .service
        .change_password(Uuid::new_v4(), PASSWORD, "new-password-1")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test]
async fn test_forgot_password_resets_with_valid_code() {
    let ctx = verified_account().await;

    let sent = ctx.service.send_verification_code(EMAIL, false).await.unwrap();
    ctx.service
        .forgot_password(EMAIL, &sent.code.code, "reset-password-1")
        .await
        .unwrap();

    ctx.service.sign_in(EMAIL, "reset-password-1").await.unwrap();
}

#[tokio::test]
async fn test_forgot_password_wrong_code() {
    let ctx = verified_account().await;

    let sent = ctx.service.send_verification_code(EMAIL, false).await.unwrap();
    let wrong = if sent.code.code == "000000" {
        "111111"
    } else {
        "000000"
    };

    let result = ctx
        .service
        .forgot_password(EMAIL, wrong, "reset-password-1")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::InvalidOtp))
    ));

    // The old password still works
    ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();
}

#[tokio::test]
async fn test_snapshot_follows_password_changes() {
    use crate::cache::{CacheStore, InMemoryCacheStore};
    use crate::services::snapshot::UserSnapshotCache;

    let ctx = verified_account().await;

    ctx.service.sign_in(EMAIL, PASSWORD).await.unwrap();
    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    let key = UserSnapshotCache::<InMemoryCacheStore>::key(user.id);

    // Sign-in warmed the snapshot
    assert!(ctx.cache.get(&key).await.unwrap().is_some());

    ctx.service
        .change_password(user.id, PASSWORD, "new-password-1")
        .await
        .unwrap();

    // Re-stored snapshot reflects the new hash
    let cached = ctx.cache.get(&key).await.unwrap().unwrap();
    let cached_user: crate::domain::entities::User = serde_json::from_str(&cached).unwrap();
    let fresh = ctx.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(cached_user.password_hash, fresh.password_hash);
}

#[tokio::test]
async fn test_forgot_password_unknown_account() {
    let ctx = context();

    let result = ctx
        .service
        .forgot_password(EMAIL, "123456", "reset-password-1")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
