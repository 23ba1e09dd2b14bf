use nestly_core::{
    CredentialHasher, Email, HashingError, Password, SessionBundle, TokenCodec, TokenError,
    UserStore, UserStoreError,
};

use crate::session::issue_session;

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Wrong password")]
    CredentialMismatch,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Hashing error: {0}")]
    HashingError(#[from] HashingError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

pub struct LoginUseCase<U, H, C>
where
    U: UserStore,
    H: CredentialHasher,
    C: TokenCodec,
{
    user_store: U,
    hasher: H,
    codec: C,
}

impl<U, H, C> LoginUseCase<U, H, C>
where
    U: UserStore,
    H: CredentialHasher,
    C: TokenCodec,
{
    pub fn new(user_store: U, hasher: H, codec: C) -> Self {
        Self {
            user_store,
            hasher,
            codec,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<SessionBundle, LoginError> {
        // Existence is settled before any credential work; a missing user is
        // UserNotFound, never a dereference of a missing hash.
        let user = self.user_store.find_by_email(&email).await?;

        if !self.hasher.verify(&password, user.credential()).await? {
            return Err(LoginError::CredentialMismatch);
        }

        Ok(issue_session(&self.codec, &user)?)
    }
}
