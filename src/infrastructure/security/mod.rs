//! Credential primitives: password hashing and bearer tokens.

pub mod password;
pub mod token;

pub use password::{generate_reset_token, PasswordHasher};
pub use token::{Claims, TokenError, TokenSigner};
