use nestly_core::{
    CredentialHasher, Email, HashingError, NewUser, Password, SessionBundle, TokenCodec,
    TokenError, User, UserStore, UserStoreError, Username,
};

use crate::session::issue_session;

/// Generated usernames collide rarely; a couple of retries is plenty.
const USERNAME_COLLISION_RETRIES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Hashing error: {0}")]
    HashingError(#[from] HashingError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Direct registration: hash the password, create the record, log the user in.
pub struct RegisterUseCase<U, H, C>
where
    U: UserStore,
    H: CredentialHasher,
    C: TokenCodec,
{
    user_store: U,
    hasher: H,
    codec: C,
}

impl<U, H, C> RegisterUseCase<U, H, C>
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

    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<SessionBundle, RegisterError> {
        let user = provision_user(&self.user_store, &self.hasher, email, password).await?;
        Ok(issue_session(&self.codec, &user)?)
    }
}

/// Hash the password and create the record under a fresh random username,
/// retrying on username collision. Email uniqueness is the store's constraint;
/// there is no separate existence check to race against. Shared by direct
/// registration and account activation.
pub(crate) async fn provision_user<U, H>(
    user_store: &U,
    hasher: &H,
    email: Email,
    password: Password,
) -> Result<User, RegisterError>
where
    U: UserStore,
    H: CredentialHasher,
{
    let credential = hasher.hash(&password).await?;

    let mut retries = USERNAME_COLLISION_RETRIES;
    loop {
        let new_user = NewUser {
            username: Username::generate(),
            email: email.clone(),
            credential: credential.clone(),
        };
        match user_store.create_user(new_user).await {
            Err(UserStoreError::UsernameTaken) if retries > 0 => retries -= 1,
            result => return Ok(result?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeCodec, MemoryUsers, PlainHasher, email, password};
    use nestly_core::Role;

    #[tokio::test]
    async fn test_register_issues_session_for_new_user() {
        let store = MemoryUsers::default();
        let use_case = RegisterUseCase::new(store.clone(), PlainHasher, FakeCodec);

        let bundle = use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        assert_eq!(bundle.user.email.as_str(), "a@x.com");
        assert_eq!(bundle.user.role, vec![Role::Buyer]);
        assert_eq!(bundle.user.username.as_str().len(), 6);

        let stored = store.get(&email("a@x.com")).await.unwrap();
        assert_eq!(stored.id(), &bundle.user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let store = MemoryUsers::default();
        let use_case = RegisterUseCase::new(store, PlainHasher, FakeCodec);

        use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();
        let result = use_case.execute(email("a@x.com"), password("other66")).await;

        assert!(matches!(
            result,
            Err(RegisterError::UserStoreError(UserStoreError::EmailTaken))
        ));
    }

    #[tokio::test]
    async fn test_register_never_stores_plaintext() {
        let store = MemoryUsers::default();
        let use_case = RegisterUseCase::new(store.clone(), PlainHasher, FakeCodec);

        use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        let stored = store.get(&email("a@x.com")).await.unwrap();
        use secrecy::ExposeSecret;
        assert_ne!(stored.credential().as_ref().expose_secret(), "secret1");
    }
}
