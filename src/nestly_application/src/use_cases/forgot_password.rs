use nestly_core::{
    Email, EmailClient, RecoveryCode, TokenCodec, TokenError, UserStore, UserStoreError,
};

/// Outcome of a reset request. `delivered` reports whether the notification
/// sink accepted the email; a failed dispatch does not fail the flow.
#[derive(Debug, PartialEq, Eq)]
pub struct ResetRequested {
    pub delivered: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// First half of the password-reset state machine: persist a fresh one-time
/// code on the record and mail out a signed token embedding it.
pub struct ForgotPasswordUseCase<U, E, C>
where
    U: UserStore,
    E: EmailClient,
    C: TokenCodec,
{
    user_store: U,
    email_client: E,
    codec: C,
    access_account_url: String,
}

impl<U, E, C> ForgotPasswordUseCase<U, E, C>
where
    U: UserStore,
    E: EmailClient,
    C: TokenCodec,
{
    pub fn new(user_store: U, email_client: E, codec: C, access_account_url: String) -> Self {
        Self {
            user_store,
            email_client,
            codec,
            access_account_url,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<ResetRequested, ForgotPasswordError> {
        let code = RecoveryCode::generate();

        // Overwrites any outstanding code for this user: only the most
        // recently issued reset stays consumable.
        let user = self.user_store.set_recovery_code(&email, &code).await?;

        let token = self.codec.issue_reset(&code)?;
        let body = format!(
            "<p>Please click the link below to access your account and reset your password</p>\n\
             <a href=\"{}/{}\">Access my Account</a>",
            self.access_account_url,
            token.as_str()
        );

        let delivered = match self
            .email_client
            .send_email(user.email(), "Access your Account", &body)
            .await
        {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%error, "reset email dispatch failed");
                false
            }
        };

        Ok(ResetRequested { delivered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeCodec, MemoryUsers, RecordingMailer, email, test_user};

    const RESET_URL: &str = "http://localhost:3000/auth/access-account";

    async fn store_with_user() -> MemoryUsers {
        let store = MemoryUsers::default();
        store.insert(test_user("a@x.com")).await;
        store
    }

    #[tokio::test]
    async fn test_request_persists_code_and_mails_token() {
        let store = store_with_user().await;
        let mailer = RecordingMailer::default();
        let use_case = ForgotPasswordUseCase::new(
            store.clone(),
            mailer.clone(),
            FakeCodec,
            RESET_URL.to_string(),
        );

        let outcome = use_case.execute(email("a@x.com")).await.unwrap();
        assert_eq!(outcome, ResetRequested { delivered: true });

        let code = store
            .get(&email("a@x.com"))
            .await
            .unwrap()
            .recovery_code()
            .cloned()
            .expect("a pending code");

        let sent = mailer.sent.read().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Access your Account");
        assert!(sent[0].html_body.contains(&format!("reset.{}", code.as_str())));
        assert!(sent[0].html_body.contains(RESET_URL));
    }

    #[tokio::test]
    async fn test_request_for_unknown_email_sends_nothing() {
        let mailer = RecordingMailer::default();
        let use_case = ForgotPasswordUseCase::new(
            MemoryUsers::default(),
            mailer.clone(),
            FakeCodec,
            RESET_URL.to_string(),
        );

        let result = use_case.execute(email("a@x.com")).await;
        assert!(matches!(
            result,
            Err(ForgotPasswordError::UserStoreError(
                UserStoreError::UserNotFound
            ))
        ));
        assert!(mailer.sent.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_degrades_ok_flag_only() {
        let store = store_with_user().await;
        let use_case = ForgotPasswordUseCase::new(
            store.clone(),
            RecordingMailer::failing(),
            FakeCodec,
            RESET_URL.to_string(),
        );

        let outcome = use_case.execute(email("a@x.com")).await.unwrap();
        assert_eq!(outcome, ResetRequested { delivered: false });

        // The code was still written; the flow did not roll back.
        assert!(
            store
                .get(&email("a@x.com"))
                .await
                .unwrap()
                .recovery_code()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_second_request_invalidates_first_code() {
        let store = store_with_user().await;
        let use_case = ForgotPasswordUseCase::new(
            store.clone(),
            RecordingMailer::default(),
            FakeCodec,
            RESET_URL.to_string(),
        );

        use_case.execute(email("a@x.com")).await.unwrap();
        let first = store
            .get(&email("a@x.com"))
            .await
            .unwrap()
            .recovery_code()
            .cloned()
            .unwrap();

        use_case.execute(email("a@x.com")).await.unwrap();
        let second = store
            .get(&email("a@x.com"))
            .await
            .unwrap()
            .recovery_code()
            .cloned()
            .unwrap();

        assert_ne!(first, second, "last writer wins on the recovery code");
    }
}
