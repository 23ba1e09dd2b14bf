use std::fmt;

use rand::{Rng, distr::Alphanumeric};
use serde::Serialize;
use thiserror::Error;

/// Generated usernames are short random ids, like the source system's user ids.
pub const GENERATED_USERNAME_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Username(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Username cannot be empty")]
pub struct UsernameError;

impl Username {
    /// Generate a random lowercase alphanumeric username. Uniqueness is
    /// enforced by the user store; callers retry on collision.
    pub fn generate() -> Self {
        let id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_USERNAME_LEN)
            .map(char::from)
            .collect();
        Self(id.to_lowercase())
    }

    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UsernameError);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
