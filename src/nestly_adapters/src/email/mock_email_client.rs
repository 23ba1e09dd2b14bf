use std::sync::Arc;

use async_trait::async_trait;
use nestly_core::{Email, EmailClient};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub subject: String,
    pub html_body: String,
}

/// Recording `EmailClient` for tests and local runs. Captures every message
/// instead of delivering it; `failing()` builds one whose sends all fail.
#[derive(Debug, Default, Clone)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: bool,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_body: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("mock email client configured to fail".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        tracing::info!(recipient = %recipient, subject, "captured outgoing email");
        Ok(())
    }
}
