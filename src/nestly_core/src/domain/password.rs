use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is required")]
    Missing,
    #[error("Password should be at least 6 characters long")]
    TooShort,
}

/// A plaintext password candidate. Only ever handed to a `CredentialHasher`
/// or embedded in a signed activation token; never persisted or logged.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        let len = raw.expose_secret().chars().count();
        if len == 0 {
            return Err(PasswordError::Missing);
        }
        if len < 6 {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(raw))
    }
}

impl Password {
    /// A login candidate. The signup length rule does not apply when checking
    /// an existing credential; only an absent password is rejected.
    pub fn candidate(raw: Secret<String>) -> Result<Self, PasswordError> {
        if raw.expose_secret().is_empty() {
            return Err(PasswordError::Missing);
        }
        Ok(Self(raw))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// The stored, salted one-way hash of a password.
#[derive(Debug, Clone)]
pub struct CredentialHash(Secret<String>);

impl CredentialHash {
    pub fn new(hash: String) -> Self {
        Self(Secret::from(hash))
    }
}

impl AsRef<Secret<String>> for CredentialHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
