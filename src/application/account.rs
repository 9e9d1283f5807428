//! Account use cases: signup, login, profile and password reset.

use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{NewUser, User};
use crate::error::Error;
use crate::infrastructure::config::auth::AuthConfig;
use crate::infrastructure::security::{
    generate_reset_token, Claims, PasswordHasher, TokenError, TokenSigner,
};
use crate::port::{AccountEvent, AccountStore, Event, Notifier, ResetRequestedEvent};

const MIN_PASSWORD_LEN: usize = 6;

/// Message returned by forgot-password whether or not the email exists.
pub const RESET_REQUESTED_MESSAGE: &str = "If the email exists, a reset link has been sent";

/// Account failures, each mapping to one client-visible outcome.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("{0}")]
    Invalid(String),

    #[error("Email already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or expired reset token")]
    UnknownResetToken,

    #[error("Reset token has expired")]
    ResetTokenExpired,

    #[error("Reset token has already been used")]
    ResetTokenUsed,

    #[error("failed to hash password: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] Error),
}

/// An issued bearer token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct AccountService {
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    reset_ttl: Duration,
    frontend_url: String,
}

impl AccountService {
    #[must_use]
    pub fn new(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn Notifier>,
        auth: &AuthConfig,
        token_secret: &str,
    ) -> Self {
        Self {
            store,
            notifier,
            hasher: PasswordHasher::new(auth.bcrypt_cost),
            signer: TokenSigner::new(token_secret, Duration::hours(auth.token_ttl_hours)),
            reset_ttl: Duration::minutes(auth.reset_token_ttl_minutes),
            frontend_url: auth.frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Register a new user and sign them in.
    pub fn signup(&self, email: &str, password: &str, name: &str) -> Result<Session, AccountError> {
        let email = email.trim();
        let name = name.trim();
        validate_email(email)?;
        validate_password(password)?;
        if name.is_empty() {
            return Err(AccountError::Invalid("Name is required".into()));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .store
            .create_user(NewUser {
                email,
                password_hash: &password_hash,
                name,
            })?
            .ok_or(AccountError::EmailTaken)?;

        info!(user_id = user.id, "user signed up");
        self.notifier.notify(Event::UserRegistered(AccountEvent {
            user_id: user.id,
            email: user.email.clone(),
        }));
        self.session(user)
    }

    /// Exchange credentials for a bearer token.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let user = self
            .store
            .find_user_by_email(email.trim())?
            .ok_or(AccountError::InvalidCredentials)?;
        if !self.hasher.verify(password, &user.password_hash) {
            warn!(user_id = user.id, "login rejected");
            return Err(AccountError::InvalidCredentials);
        }
        self.session(user)
    }

    /// Verify a bearer token.
    pub fn authenticate(&self, token: &str) -> Result<Claims, TokenError> {
        self.signer.verify(token, Utc::now())
    }

    pub fn profile(&self, user_id: i32) -> Result<User, AccountError> {
        self.store
            .find_user(user_id)?
            .ok_or(AccountError::UserNotFound)
    }

    /// Start a password reset. Unknown emails succeed silently.
    pub fn forgot_password(&self, email: &str) -> Result<(), AccountError> {
        let Some(user) = self.store.find_user_by_email(email.trim())? else {
            return Ok(());
        };

        let token = generate_reset_token();
        let expires_at = Utc::now().naive_utc() + self.reset_ttl;
        self.store.save_reset_token(user.id, &token, expires_at)?;

        info!(user_id = user.id, "password reset requested");
        self.notifier
            .notify(Event::PasswordResetRequested(ResetRequestedEvent {
                email: user.email,
                name: user.name,
                reset_link: format!("{}/reset-password?token={token}", self.frontend_url),
                expires_at,
            }));
        Ok(())
    }

    /// Redeem a reset token and set a new password.
    pub fn reset_password(&self, token: &str, password: &str) -> Result<(), AccountError> {
        let reset = self
            .store
            .find_reset_token(token.trim())?
            .ok_or(AccountError::UnknownResetToken)?;
        if reset.is_expired(Utc::now().naive_utc()) {
            return Err(AccountError::ResetTokenExpired);
        }
        if reset.used {
            return Err(AccountError::ResetTokenUsed);
        }
        validate_password(password)?;

        let password_hash = self.hasher.hash(password)?;
        if !self.store.complete_reset(&reset, &password_hash)? {
            warn!(user_id = reset.user_id, "reset token claimed concurrently");
            return Err(AccountError::ResetTokenUsed);
        }

        let user = self.store.find_user(reset.user_id)?;
        info!(user_id = reset.user_id, "password reset completed");
        if let Some(user) = user {
            self.notifier.notify(Event::PasswordReset(AccountEvent {
                user_id: user.id,
                email: user.email,
            }));
        }
        Ok(())
    }

    fn session(&self, user: User) -> Result<Session, AccountError> {
        let token = self.signer.issue(user.id, &user.email, Utc::now())?;
        Ok(Session { token, user })
    }
}

fn validate_email(email: &str) -> Result<(), AccountError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if valid {
        Ok(())
    } else {
        Err(AccountError::Invalid("Invalid email address".into()))
    }
}

fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::Invalid(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
