use nestly_core::{AuthToken, CredentialHasher, SessionBundle, TokenCodec, TokenError, UserStore};

use crate::session::issue_session;
use crate::use_cases::register::{RegisterError, provision_user};

#[derive(Debug, thiserror::Error)]
pub enum ActivateError {
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
    #[error("Registration error: {0}")]
    RegisterError(#[from] RegisterError),
}

/// Email-gated signup, second half: redeem the activation token and perform
/// the same hash-and-create steps as direct registration.
pub struct ActivateUseCase<U, H, C>
where
    U: UserStore,
    H: CredentialHasher,
    C: TokenCodec,
{
    user_store: U,
    hasher: H,
    codec: C,
}

impl<U, H, C> ActivateUseCase<U, H, C>
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

    #[tracing::instrument(name = "ActivateUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        activation_token: &AuthToken,
    ) -> Result<SessionBundle, ActivateError> {
        let (email, password) = self.codec.verify_activation(activation_token)?;
        let user = provision_user(&self.user_store, &self.hasher, email, password).await?;
        Ok(issue_session(&self.codec, &user)?)
    }
}
