use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::CredentialHash,
    recovery_code::RecoveryCode,
    user::{User, UserId},
    username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("This email has been taken, try log in")]
    EmailTaken,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Could not find user with the Email")]
    UserNotFound,
    #[error("Reset code is invalid or already used")]
    RecoveryCodeNotFound,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::UsernameTaken, Self::UsernameTaken) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::RecoveryCodeNotFound, Self::RecoveryCodeNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Fields needed to persist a brand-new user. The store assigns the id and
/// timestamps and enforces email/username uniqueness.
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub credential: CredentialHash,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;

    /// Write a fresh recovery code onto the user's record, overwriting any
    /// outstanding one. At most one reset is pending per user; last writer
    /// wins.
    async fn set_recovery_code(
        &self,
        email: &Email,
        code: &RecoveryCode,
    ) -> Result<User, UserStoreError>;

    /// Find the user whose pending recovery code equals `code` and clear the
    /// code in the same store operation. The lookup and the clear are atomic
    /// so a code can be spent at most once; a code that matches no record
    /// fails with `RecoveryCodeNotFound`.
    async fn consume_recovery_code(&self, code: &RecoveryCode) -> Result<User, UserStoreError>;
}
