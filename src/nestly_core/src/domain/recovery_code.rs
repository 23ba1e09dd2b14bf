use rand::{Rng, distr::Alphanumeric};
use thiserror::Error;

const RECOVERY_CODE_LEN: usize = 21;

/// A single-use, high-entropy code written onto a user record when a password
/// reset starts. Stores encode "no pending reset" as the empty string, so an
/// empty code is never a valid value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecoveryCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Recovery code cannot be empty")]
pub struct RecoveryCodeError;

impl RecoveryCode {
    pub fn generate() -> Self {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(RECOVERY_CODE_LEN)
            .map(char::from)
            .collect();
        Self(code)
    }

    pub fn parse(raw: &str) -> Result<Self, RecoveryCodeError> {
        if raw.is_empty() {
            return Err(RecoveryCodeError);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_unique() {
        let a = RecoveryCode::generate();
        let b = RecoveryCode::generate();
        assert_eq!(a.as_str().len(), RECOVERY_CODE_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(RecoveryCode::parse(""), Err(RecoveryCodeError));
    }
}
