use nestly_core::{AuthToken, SessionBundle, TokenCodec, TokenError, UserStore, UserStoreError};

use crate::session::issue_session;

#[derive(Debug, thiserror::Error)]
pub enum AccessAccountError {
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Second half of the password-reset state machine: redeem the mailed token.
/// The embedded code is spent atomically; a code that no longer matches any
/// record (already consumed, or never issued) fails, it never falls through
/// to some stale record.
pub struct AccessAccountUseCase<U, C>
where
    U: UserStore,
    C: TokenCodec,
{
    user_store: U,
    codec: C,
}

impl<U, C> AccessAccountUseCase<U, C>
where
    U: UserStore,
    C: TokenCodec,
{
    pub fn new(user_store: U, codec: C) -> Self {
        Self { user_store, codec }
    }

    #[tracing::instrument(name = "AccessAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, reset_token: &AuthToken) -> Result<SessionBundle, AccessAccountError> {
        let code = self.codec.verify_reset(reset_token)?;
        let user = self.user_store.consume_recovery_code(&code).await?;
        Ok(issue_session(&self.codec, &user)?)
    }
}
