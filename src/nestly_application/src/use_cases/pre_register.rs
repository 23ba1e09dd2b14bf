use nestly_core::{
    Email, EmailClient, Password, TokenCodec, TokenError, UserStore, UserStoreError,
};

/// Outcome of an activation request; `delivered` mirrors the notification
/// sink's verdict only.
#[derive(Debug, PartialEq, Eq)]
pub struct ActivationRequested {
    pub delivered: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PreRegisterError {
    #[error("This email has been taken, try log in")]
    EmailTaken,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Email-gated signup, first half: mint an activation token carrying the whole
/// pending registration and mail it out. No store record exists until the
/// token is redeemed.
pub struct PreRegisterUseCase<U, E, C>
where
    U: UserStore,
    E: EmailClient,
    C: TokenCodec,
{
    user_store: U,
    email_client: E,
    codec: C,
    activate_url: String,
}

impl<U, E, C> PreRegisterUseCase<U, E, C>
where
    U: UserStore,
    E: EmailClient,
    C: TokenCodec,
{
    pub fn new(user_store: U, email_client: E, codec: C, activate_url: String) -> Self {
        Self {
            user_store,
            email_client,
            codec,
            activate_url,
        }
    }

    #[tracing::instrument(name = "PreRegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<ActivationRequested, PreRegisterError> {
        match self.user_store.find_by_email(&email).await {
            Ok(_) => return Err(PreRegisterError::EmailTaken),
            Err(UserStoreError::UserNotFound) => {}
            Err(other) => return Err(other.into()),
        }

        let token = self.codec.issue_activation(&email, &password)?;
        let body = format!(
            "<p>Please click the link below to activate the account</p>\n\
             <a href=\"{}/{}\">Activate My Account</a>",
            self.activate_url,
            token.as_str()
        );

        let delivered = match self
            .email_client
            .send_email(&email, "Activate your Account", &body)
            .await
        {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%error, "activation email dispatch failed");
                false
            }
        };

        Ok(ActivationRequested { delivered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeCodec, MemoryUsers, RecordingMailer, email, password, test_user};

    const ACTIVATE_URL: &str = "http://localhost:3000/auth/account-activate";

    #[tokio::test]
    async fn test_pre_register_mails_activation_token_without_creating_record() {
        let store = MemoryUsers::default();
        let mailer = RecordingMailer::default();
        let use_case = PreRegisterUseCase::new(
            store.clone(),
            mailer.clone(),
            FakeCodec,
            ACTIVATE_URL.to_string(),
        );

        let outcome = use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();
        assert_eq!(outcome, ActivationRequested { delivered: true });

        assert!(store.get(&email("a@x.com")).await.is_none());

        let sent = mailer.sent.read().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Activate your Account");
        assert!(sent[0].html_body.contains(ACTIVATE_URL));
    }

    #[tokio::test]
    async fn test_pre_register_rejects_taken_email() {
        let store = MemoryUsers::default();
        store.insert(test_user("a@x.com")).await;
        let use_case = PreRegisterUseCase::new(
            store,
            RecordingMailer::default(),
            FakeCodec,
            ACTIVATE_URL.to_string(),
        );

        let result = use_case.execute(email("a@x.com"), password("secret1")).await;
        assert!(matches!(result, Err(PreRegisterError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_pre_register_reports_failed_dispatch() {
        let use_case = PreRegisterUseCase::new(
            MemoryUsers::default(),
            RecordingMailer::failing(),
            FakeCodec,
            ACTIVATE_URL.to_string(),
        );

        let outcome = use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();
        assert_eq!(outcome, ActivationRequested { delivered: false });
    }
}
