//! Email client: forwards validated contact messages to the Resend API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contact::models::ContactMessage;
use crate::upstream::{interpret_upstream_error, UpstreamFailure};

pub mod template;

pub const SERVICE: &str = "Resend";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: String,
    html: String,
    text: String,
}

/// Acknowledgement returned by the email API.
#[derive(Debug, Default, Deserialize)]
pub struct SendReceipt {
    pub id: Option<String>,
}

#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    api_key: String,
    base_url: String,
    from: String,
    to: String,
}

impl EmailClient {
    pub fn new(client: Client, api_key: String, base_url: String, from: String, to: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            from,
            to,
        }
    }

    /// Sends one email for the message. Replies go to the sender's address.
    pub async fn send_contact(&self, msg: &ContactMessage) -> Result<SendReceipt, UpstreamFailure> {
        let request_body = SendEmailRequest {
            from: &self.from,
            to: [&self.to],
            reply_to: &msg.email,
            subject: template::subject(msg),
            html: template::render_html(msg),
            text: template::render_text(msg),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| UpstreamFailure::unreachable(SERVICE, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(interpret_upstream_error(SERVICE, status, &body));
        }

        // A success without a parsable receipt is still a success.
        let receipt = response.json::<SendReceipt>().await.unwrap_or_default();
        info!(
            "Email sent successfully: id={}",
            receipt.id.as_deref().unwrap_or("unknown")
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> EmailClient {
        EmailClient::new(
            Client::new(),
            "re_test".to_string(),
            server.base_url(),
            "Portfolio <onboarding@resend.dev>".to_string(),
            "owner@example.com".to_string(),
        )
    }

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "hello world!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_contact_posts_expected_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/emails")
                    .header("authorization", "Bearer re_test")
                    .json_body_partial(
                        r#"{
                            "from": "Portfolio <onboarding@resend.dev>",
                            "to": ["owner@example.com"],
                            "reply_to": "ada@example.com",
                            "subject": "Portfolio Contact: Ada"
                        }"#,
                    );
                then.status(200).json_body(json!({"id": "email_123"}));
            })
            .await;

        let receipt = client_for(&server).send_contact(&message()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(receipt.id.as_deref(), Some("email_123"));
    }

    #[tokio::test]
    async fn test_send_contact_interprets_failures() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(403)
                    .json_body(json!({"statusCode": 403, "message": "Domain not verified"}));
            })
            .await;

        let failure = client_for(&server)
            .send_contact(&message())
            .await
            .unwrap_err();
        assert_eq!(failure.service, SERVICE);
        assert_eq!(failure.message, "Domain not verified");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_failure() {
        let client = EmailClient::new(
            Client::new(),
            "re_test".to_string(),
            "http://127.0.0.1:1".to_string(),
            "from@example.com".to_string(),
            "to@example.com".to_string(),
        );

        let failure = client.send_contact(&message()).await.unwrap_err();
        assert_eq!(failure.message, "Failed to reach Resend");
        assert!(failure.status.is_none());
    }
}
