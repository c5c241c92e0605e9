#![cfg(feature = "auth")]

mod common;

use common::Harness;
use scribe_core::DomainError;
use scribe_core::domain::Role;
use scribe_core::ports::{TokenDenylist, TokenService};
use scribe_core::services::{PasswordChange, PasswordReset, ProfileUpdate, Registration};

fn registration(email: &str) -> Registration {
    Registration {
        full_name: "Ada Lovelace".into(),
        email: email.into(),
        password: "analytical-engine".into(),
        mobile_number: "0123456789".into(),
        role: None,
        bio: Some("First programmer".into()),
        avatar: None,
    }
}

#[tokio::test]
async fn test_register_defaults_to_read_role() {
    let h = Harness::new();

    let user = h.accounts.register(registration("ada@example.com")).await.unwrap();

    assert_eq!(user.role, Role::Read);
    assert_ne!(user.password_hash, "analytical-engine");
    assert_eq!(user.bio.as_deref(), Some("First programmer"));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let h = Harness::new();
    h.accounts.register(registration("ada@example.com")).await.unwrap();

    let err = h
        .accounts
        .register(registration("ada@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::EmailAlreadyExists));
}

#[tokio::test]
async fn test_authenticate_issues_token_for_user() {
    let h = Harness::new();
    let user = h.accounts.register(registration("ada@example.com")).await.unwrap();

    let issued = h
        .accounts
        .authenticate("ada@example.com", "analytical-engine")
        .await
        .unwrap();

    let claims = h.tokens.validate_token(&issued.access_token).unwrap();
    assert_eq!(claims.user_id, user.id);
    assert_eq!(issued.expires_in, 3600);

    let err = h
        .accounts
        .authenticate("ada@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    let err = h
        .accounts
        .authenticate("nobody@example.com", "analytical-engine")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let h = Harness::new();
    h.accounts.register(registration("ada@example.com")).await.unwrap();
    let issued = h
        .accounts
        .authenticate("ada@example.com", "analytical-engine")
        .await
        .unwrap();

    h.accounts.logout(&issued.access_token).await;

    assert!(h.denylist.is_revoked(&issued.access_token).await);
    h.accounts.logout("garbage").await;
    assert_eq!(h.denylist.len().await, 1);
}

#[tokio::test]
async fn test_change_password_rules() {
    let h = Harness::new();
    let user = h.accounts.register(registration("ada@example.com")).await.unwrap();
    let change = |current: &str, new: &str, confirm: &str| PasswordChange {
        email: "ada@example.com".into(),
        current_password: current.into(),
        new_password: new.into(),
        confirm_password: confirm.into(),
    };

    let err = h
        .accounts
        .change_password(change("analytical-engine", "a", "b"), user.id + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorValidationFailed));

    let err = h
        .accounts
        .change_password(change("analytical-engine", "a", "b"), user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PasswordConfirmationMismatch));

    let err = h
        .accounts
        .change_password(change("wrong", "difference", "difference"), user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::CurrentPasswordIncorrect));

    let err = h
        .accounts
        .change_password(
            change("analytical-engine", "analytical-engine", "analytical-engine"),
            user.id,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PasswordReused));

    h.accounts
        .change_password(change("analytical-engine", "difference", "difference"), user.id)
        .await
        .unwrap();
    assert!(
        h.accounts
            .authenticate("ada@example.com", "difference")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_forgot_password_checks_mobile_number() {
    let h = Harness::new();
    h.accounts.register(registration("ada@example.com")).await.unwrap();
    let reset = |email: &str, mobile: &str| PasswordReset {
        email: email.into(),
        mobile_number: mobile.into(),
        new_password: "difference".into(),
        confirm_password: "difference".into(),
    };

    let err = h
        .accounts
        .forgot_password(reset("nobody@example.com", "0123456789"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound));

    let err = h
        .accounts
        .forgot_password(reset("ada@example.com", "9999999999"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MobileNumberMismatch));

    h.accounts
        .forgot_password(reset("ada@example.com", "0123456789"))
        .await
        .unwrap();
    assert!(
        h.accounts
            .authenticate("ada@example.com", "difference")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_update_profile_is_self_service() {
    let h = Harness::new();
    let user = h.accounts.register(registration("ada@example.com")).await.unwrap();

    let err = h
        .accounts
        .update_profile(user.id, ProfileUpdate::default(), user.id + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorValidationFailed));

    let updated = h
        .accounts
        .update_profile(
            user.id,
            ProfileUpdate {
                bio: Some("Analyst".into()),
                ..ProfileUpdate::default()
            },
            user.id,
        )
        .await
        .unwrap();
    assert_eq!(updated.bio.as_deref(), Some("Analyst"));
    assert_eq!(updated.full_name, "Ada Lovelace");
}
