use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nestly_core::{
    Email, NewUser, RecoveryCode, User, UserId, UserStore, UserStoreError,
};
use tokio::sync::RwLock;

/// In-memory `UserStore` for tests and local runs. Every mutation takes the
/// single write lock, which is what makes recovery-code consumption atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email() == &new_user.email) {
            return Err(UserStoreError::EmailTaken);
        }
        if users.values().any(|u| u.username() == &new_user.username) {
            return Err(UserStoreError::UsernameTaken);
        }

        let user = User::new(new_user.username, new_user.email, new_user.credential);
        users.insert(*user.id(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
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
            .values_mut()
            .find(|u| u.email() == email)
            .ok_or(UserStoreError::UserNotFound)?;
        user.set_recovery_code(Some(code.clone()));
        Ok(user.clone())
    }

    async fn consume_recovery_code(&self, code: &RecoveryCode) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|u| u.recovery_code() == Some(code))
            .ok_or(UserStoreError::RecoveryCodeNotFound)?;
        user.set_recovery_code(None);
        Ok(user.clone())
    }
}
