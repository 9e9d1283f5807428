//! User accounts and password-reset tokens.

use chrono::NaiveDateTime;
use serde::Serialize;

/// A registered user. The password hash never leaves the store layer in
/// serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Fields needed to create a user.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
}

/// A single-use password reset token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetToken {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: NaiveDateTime,
    pub used: bool,
}

impl PasswordResetToken {
    /// True once `now` is past the expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now > self.expires_at
    }
}
