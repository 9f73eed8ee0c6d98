//! Password value object.
//!
//! Users are persisted with an Argon2 PHC string, never the plain text.
//! Repositories treat the stored value as an opaque secret.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// An Argon2 hash produced from a plain password that met the length rule.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Check the length rule, then hash with a fresh random salt.
    pub fn new(plain: &str) -> DomainResult<Self> {
        if plain.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Rule(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| Password(hash.to_string()))
            .map_err(|e| DomainError::Hashing(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.0
    }
}
