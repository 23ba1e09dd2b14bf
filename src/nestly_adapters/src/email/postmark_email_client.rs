use async_trait::async_trait;
use nestly_core::{Email, EmailClient};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

/// `EmailClient` backed by Postmark's single-send API.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    reply_to: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        reply_to: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            reply_to,
            authorization_token,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html_body: &'a str,
}

#[async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email", skip(self, html_body))]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_body: &str,
    ) -> Result<(), String> {
        let url = format!("{}/email", self.base_url.trim_end_matches('/'));
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            reply_to: self.reply_to.as_ref(),
            subject,
            html_body,
        };

        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|error| error.to_string())?
            .error_for_status()
            .map_err(|error| error.to_string())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, faker::internet::en::SafeEmail};
    use std::time::Duration;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    struct SendEmailBodyMatcher;

    impl wiremock::Match for SendEmailBodyMatcher {
        fn matches(&self, request: &Request) -> bool {
            serde_json::from_slice::<serde_json::Value>(&request.body).is_ok_and(|body| {
                body.get("From").is_some()
                    && body.get("To").is_some()
                    && body.get("ReplyTo").is_some()
                    && body.get("Subject").is_some()
                    && body.get("HtmlBody").is_some()
            })
        }
    }

    fn email() -> Email {
        Email::parse(&SafeEmail().fake::<String>()).unwrap()
    }

    fn email_client(base_url: String) -> PostmarkEmailClient {
        PostmarkEmailClient::new(
            base_url,
            email(),
            email(),
            Secret::from("server-token".to_string()),
            Client::builder()
                .timeout(Duration::from_millis(200))
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_sends_expected_request() {
        let mock_server = MockServer::start().await;
        let client = email_client(mock_server.uri());

        Mock::given(header_exists("X-Postmark-Server-Token"))
            .and(header("Content-Type", "application/json"))
            .and(path("/email"))
            .and(method("POST"))
            .and(SendEmailBodyMatcher)
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = client
            .send_email(&email(), "subject", "<p>body</p>")
            .await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let mock_server = MockServer::start().await;
        let client = email_client(mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = client
            .send_email(&email(), "subject", "<p>body</p>")
            .await;
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let mock_server = MockServer::start().await;
        let client = email_client(mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = client
            .send_email(&email(), "subject", "<p>body</p>")
            .await;
        assert!(outcome.is_err());
    }
}
