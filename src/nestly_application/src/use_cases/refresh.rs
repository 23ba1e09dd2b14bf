use nestly_core::{AuthToken, SessionBundle, TokenCodec, TokenError, UserStore, UserStoreError};

use crate::session::issue_session;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Rolling refresh: a valid refresh token re-authenticates the subject and
/// re-grants a complete new token pair, not just a new access token.
pub struct RefreshUseCase<U, C>
where
    U: UserStore,
    C: TokenCodec,
{
    user_store: U,
    codec: C,
}

impl<U, C> RefreshUseCase<U, C>
where
    U: UserStore,
    C: TokenCodec,
{
    pub fn new(user_store: U, codec: C) -> Self {
        Self { user_store, codec }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &AuthToken) -> Result<SessionBundle, RefreshError> {
        let subject = self.codec.verify_subject(refresh_token)?;
        let user = self.user_store.find_by_id(&subject).await?;
        Ok(issue_session(&self.codec, &user)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegisterUseCase;
    use crate::test_support::{FakeCodec, MemoryUsers, PlainHasher, email, password};

    #[tokio::test]
    async fn test_refresh_reissues_full_pair() {
        let store = MemoryUsers::default();
        let bundle = RegisterUseCase::new(store.clone(), PlainHasher, FakeCodec)
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        let use_case = RefreshUseCase::new(store, FakeCodec);
        let refreshed = use_case.execute(&bundle.refresh_token).await.unwrap();

        assert_eq!(refreshed.user.id, bundle.user.id);
        let codec = FakeCodec;
        assert!(codec.verify_subject(&refreshed.token).is_ok());
        assert!(codec.verify_subject(&refreshed.refresh_token).is_ok());
    }

    #[tokio::test]
    async fn test_refresh_rejects_malformed_token() {
        let use_case = RefreshUseCase::new(MemoryUsers::default(), FakeCodec);

        let result = use_case.execute(&AuthToken::from("garbage".to_string())).await;
        assert!(matches!(
            result,
            Err(RefreshError::TokenError(TokenError::Invalid))
        ));
    }

    #[tokio::test]
    async fn test_refresh_fails_for_deleted_subject() {
        let seeded = MemoryUsers::default();
        let bundle = RegisterUseCase::new(seeded, PlainHasher, FakeCodec)
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        // Token is valid but the subject no longer exists in this store.
        let use_case = RefreshUseCase::new(MemoryUsers::default(), FakeCodec);
        let result = use_case.execute(&bundle.refresh_token).await;

        assert!(matches!(
            result,
            Err(RefreshError::UserStoreError(UserStoreError::UserNotFound))
        ));
    }
}
