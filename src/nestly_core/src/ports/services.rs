use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{CredentialHash, Password},
    recovery_code::RecoveryCode,
    session::AuthToken,
    user::UserId,
};

// CredentialHasher port trait and errors
#[derive(Debug, Error)]
#[error("Credential hashing failed: {0}")]
pub struct HashingError(pub String);

#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<CredentialHash, HashingError>;

    /// A mismatch is `Ok(false)`; `Err` is reserved for infrastructure
    /// failures (malformed stored hash, hashing backend errors).
    async fn verify(
        &self,
        candidate: &Password,
        stored: &CredentialHash,
    ) -> Result<bool, HashingError>;
}

// EmailClient port trait
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_body: &str,
    ) -> Result<(), String>;
}

// TokenCodec port trait and errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed token or bad signature.
    #[error("Invalid token")]
    Invalid,
    /// Valid signature, past its TTL.
    #[error("Expired token")]
    Expired,
    #[error("Unexpected token error: {0}")]
    UnexpectedError(String),
}

/// Signs and verifies compact, expiring claims with one process-wide secret.
/// Callers pick the claim shape by purpose; the codec keeps the purposes from
/// being interchangeable.
pub trait TokenCodec: Send + Sync {
    fn issue_access(&self, subject: &UserId) -> Result<AuthToken, TokenError>;
    fn issue_refresh(&self, subject: &UserId) -> Result<AuthToken, TokenError>;
    fn verify_subject(&self, token: &AuthToken) -> Result<UserId, TokenError>;

    fn issue_reset(&self, code: &RecoveryCode) -> Result<AuthToken, TokenError>;
    fn verify_reset(&self, token: &AuthToken) -> Result<RecoveryCode, TokenError>;

    fn issue_activation(&self, email: &Email, password: &Password)
    -> Result<AuthToken, TokenError>;
    fn verify_activation(&self, token: &AuthToken) -> Result<(Email, Password), TokenError>;
}
