//! User and password-reset persistence port.

use chrono::NaiveDateTime;

use crate::domain::{NewUser, PasswordResetToken, User};
use crate::error::Result;

pub trait AccountStore: Send + Sync {
    /// Non-deleted user with this email.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Non-deleted user with this id.
    fn find_user(&self, id: i32) -> Result<Option<User>>;

    /// Insert a user. Returns `None` when the email is already registered.
    fn create_user(&self, user: NewUser<'_>) -> Result<Option<User>>;

    /// Persist a fresh reset token for `user_id`.
    fn save_reset_token(&self, user_id: i32, token: &str, expires_at: NaiveDateTime)
        -> Result<()>;

    fn find_reset_token(&self, token: &str) -> Result<Option<PasswordResetToken>>;

    /// Claim the token and set the new password hash, atomically.
    ///
    /// Returns `false`, changing nothing, when the token was already used.
    fn complete_reset(&self, token: &PasswordResetToken, password_hash: &str) -> Result<bool>;
}
