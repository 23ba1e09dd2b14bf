//! Hand-rolled fakes shared by the use case tests.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

use nestly_core::{
    AuthToken, CredentialHash, CredentialHasher, Email, EmailClient, HashingError, NewUser,
    Password, RecoveryCode, TokenCodec, TokenError, User, UserId, UserStore, UserStoreError,
    Username,
};

pub fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn test_user(raw_email: &str) -> User {
    User::new(
        Username::generate(),
        email(raw_email),
        CredentialHash::new("plain$password123".to_string()),
    )
}

/// Transparent stand-in for the argon2 adapter: "hashes" are the plaintext
/// behind a marker prefix, so tests stay fast and assertable.
#[derive(Clone, Default)]
pub struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, password: &Password) -> Result<CredentialHash, HashingError> {
        Ok(CredentialHash::new(format!(
            "plain${}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify(
        &self,
        candidate: &Password,
        stored: &CredentialHash,
    ) -> Result<bool, HashingError> {
        let expected = format!("plain${}", candidate.as_ref().expose_secret());
        Ok(stored.as_ref().expose_secret() == &expected)
    }
}

/// Codec whose tokens are readable strings, round-tripping the claims without
/// any cryptography.
#[derive(Clone, Default)]
pub struct FakeCodec;

impl TokenCodec for FakeCodec {
    fn issue_access(&self, subject: &UserId) -> Result<AuthToken, TokenError> {
        Ok(AuthToken::from(format!("access.{subject}")))
    }

    fn issue_refresh(&self, subject: &UserId) -> Result<AuthToken, TokenError> {
        Ok(AuthToken::from(format!("refresh.{subject}")))
    }

    fn verify_subject(&self, token: &AuthToken) -> Result<UserId, TokenError> {
        let raw = token.as_str();
        let id = raw
            .strip_prefix("access.")
            .or_else(|| raw.strip_prefix("refresh."))
            .ok_or(TokenError::Invalid)?;
        UserId::parse(id).map_err(|_| TokenError::Invalid)
    }

    fn issue_reset(&self, code: &RecoveryCode) -> Result<AuthToken, TokenError> {
        Ok(AuthToken::from(format!("reset.{}", code.as_str())))
    }

    fn verify_reset(&self, token: &AuthToken) -> Result<RecoveryCode, TokenError> {
        let code = token
            .as_str()
            .strip_prefix("reset.")
            .ok_or(TokenError::Invalid)?;
        RecoveryCode::parse(code).map_err(|_| TokenError::Invalid)
    }

    fn issue_activation(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AuthToken, TokenError> {
        Ok(AuthToken::from(format!(
            "activation.{}|{}",
            email,
            password.as_ref().expose_secret()
        )))
    }

    fn verify_activation(&self, token: &AuthToken) -> Result<(Email, Password), TokenError> {
        let payload = token
            .as_str()
            .strip_prefix("activation.")
            .ok_or(TokenError::Invalid)?;
        let (raw_email, raw_password) = payload.split_once('|').ok_or(TokenError::Invalid)?;
        let email = Email::parse(raw_email).map_err(|_| TokenError::Invalid)?;
        let password = Password::try_from(Secret::from(raw_password.to_string()))
            .map_err(|_| TokenError::Invalid)?;
        Ok((email, password))
    }
}

/// In-memory user store with the same uniqueness and atomicity rules the real
/// adapters enforce.
#[derive(Clone, Default)]
pub struct MemoryUsers {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUsers {
    pub async fn get(&self, email: &Email) -> Option<User> {
        let users = self.users.read().await;
        users.iter().find(|u| u.email() == email).cloned()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email() == &new_user.email) {
            return Err(UserStoreError::EmailTaken);
        }
        if users.iter().any(|u| u.username() == &new_user.username) {
            return Err(UserStoreError::UsernameTaken);
        }
        let user = User::new(new_user.username, new_user.email, new_user.credential);
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.get(email).await.ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.id() == id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_recovery_code(
        &self,
        email: &Email,
        code: &RecoveryCode,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.email() == email)
            .ok_or(UserStoreError::UserNotFound)?;
        user.set_recovery_code(Some(code.clone()));
        Ok(user.clone())
    }

    async fn consume_recovery_code(&self, code: &RecoveryCode) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.recovery_code() == Some(code))
            .ok_or(UserStoreError::RecoveryCodeNotFound)?;
        user.set_recovery_code(None);
        Ok(user.clone())
    }
}

pub struct SentEmail {
    pub recipient: Email,
    pub subject: String,
    pub html_body: String,
}

/// Records outbound mail; can be flipped into a failing sink.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<RwLock<Vec<SentEmail>>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl EmailClient for RecordingMailer {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_body: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("dispatch failed".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}
