//! Account management: registration, login, logout and self-service profile
//! and password changes.

use std::sync::Arc;

use crate::domain::{Id, Role, User};
use crate::error::{DomainError, DomainResult};
use crate::ports::{PasswordService, TokenDenylist, TokenService, UserRepository};
use crate::services::guard;

/// Registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub mobile_number: String,
    pub role: Option<Role>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

/// Profile fields a user may change. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub mobile_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Password reset proven by the mobile number on file.
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub mobile_number: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
    denylist: Arc<dyn TokenDenylist>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        denylist: Arc<dyn TokenDenylist>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            denylist,
        }
    }

    pub async fn register(&self, registration: Registration) -> DomainResult<User> {
        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(DomainError::EmailAlreadyExists);
        }

        let password_hash = self.passwords.hash(&registration.password)?;
        let mut user = User::new(
            registration.full_name,
            registration.email,
            password_hash,
            registration.mobile_number,
            registration.role.unwrap_or(Role::Read),
        );
        user.bio = registration.bio;
        user.avatar = registration.avatar;
        let user = self.users.save(user).await?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<IssuedToken> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "rejected login");
            return Err(DomainError::InvalidCredentials);
        }

        let access_token = self.tokens.generate_token(&user)?;
        tracing::info!(user_id = user.id, "user authenticated");
        Ok(IssuedToken {
            access_token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    /// Revoke a bearer token until it would have expired anyway. Tokens that no
    /// longer verify are already unusable and are ignored.
    pub async fn logout(&self, token: &str) {
        match self.tokens.validate_token(token) {
            Ok(claims) => {
                self.denylist.revoke(token, claims.exp).await;
                tracing::info!(user_id = claims.user_id, "token revoked");
            }
            Err(e) => tracing::debug!(error = %e, "logout with unusable token"),
        }
    }

    pub async fn forgot_password(&self, reset: PasswordReset) -> DomainResult<()> {
        if reset.new_password != reset.confirm_password {
            return Err(DomainError::PasswordConfirmationMismatch);
        }

        let mut user = self
            .users
            .find_by_email(&reset.email)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if user.mobile_number != reset.mobile_number {
            return Err(DomainError::MobileNumberMismatch);
        }

        self.replace_password(&mut user, &reset.new_password)?;
        let user = self.users.save(user).await?;

        tracing::info!(user_id = user.id, email = %mask_email(&user.email), "password reset");
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user_id: Id,
        update: ProfileUpdate,
        actor: Id,
    ) -> DomainResult<User> {
        guard::verify_ownership(actor, user_id)?;

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(mobile_number) = update.mobile_number {
            user.mobile_number = mobile_number;
        }
        user.updated_at = chrono::Utc::now();
        let user = self.users.save(user).await?;

        tracing::info!(user_id, "profile updated");
        Ok(user)
    }

    /// The account is looked up by email, so the guard runs after the lookup here.
    pub async fn change_password(&self, change: PasswordChange, actor: Id) -> DomainResult<()> {
        let mut user = self
            .users
            .find_by_email(&change.email)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        guard::verify_ownership(actor, user.id)?;

        if change.new_password != change.confirm_password {
            return Err(DomainError::PasswordConfirmationMismatch);
        }
        if !self
            .passwords
            .verify(&change.current_password, &user.password_hash)?
        {
            return Err(DomainError::CurrentPasswordIncorrect);
        }

        self.replace_password(&mut user, &change.new_password)?;
        self.users.save(user).await?;

        tracing::info!(user_id = actor, "password changed");
        Ok(())
    }

    fn replace_password(&self, user: &mut User, new_password: &str) -> DomainResult<()> {
        if self
            .passwords
            .verify(new_password, &user.password_hash)?
        {
            return Err(DomainError::PasswordReused);
        }
        user.password_hash = self.passwords.hash(new_password)?;
        user.updated_at = chrono::Utc::now();
        Ok(())
    }
}

/// Mask the local part of an email so it can be logged.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}
