use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::mailer::{DeliveryReceipt, MailError, MailTransport, OutboundEmail};
use crate::config::MailConfig;

#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Thin client for the Resend `POST /emails` API.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(api_key: Option<String>, base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, base_url)
    }

    pub fn with_client(client: reqwest::Client, api_key: Option<String>, base_url: &str) -> Self {
        Self {
            client,
            api_key,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &MailConfig) -> Self {
        Self::new(config.api_key.clone(), &config.api_base_url)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("endpoint", &self.endpoint)
            .field("api_key_configured", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MailTransport for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailError> {
        let api_key = self.api_key.as_deref().ok_or(MailError::MissingApiKey)?;

        let request = ResendEmailRequest {
            from: &email.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ResendErrorResponse>(&body)
                .ok()
                .and_then(|error| error.message.or(error.name))
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(MailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let accepted: ResendEmailResponse =
            serde_json::from_slice(&body).map_err(|err| MailError::Decode(err.to_string()))?;
        debug!(id = ?accepted.id, "resend accepted message");
        Ok(DeliveryReceipt::accepted(accepted.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            from: "Chicago Giants <onboarding@resend.dev>".to_string(),
            to: "coaches@giants.example".to_string(),
            subject: "New Fan Coach Application from Dana".to_string(),
            html: "<h1>hi</h1>".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let mailer = ResendMailer::new(None, "http://127.0.0.1:9");
        let err = mailer.send(&email()).await.expect_err("no key configured");
        assert!(matches!(err, MailError::MissingApiKey));
    }

    #[test]
    fn endpoint_targets_emails_resource() {
        let mailer = ResendMailer::new(Some("re_test".to_string()), "https://api.resend.com/");
        assert_eq!(mailer.endpoint(), "https://api.resend.com/emails");
        assert!(!format!("{mailer:?}").contains("re_test"));
    }

    #[test]
    fn request_wraps_recipient_in_a_list() {
        let email = email();
        let request = ResendEmailRequest {
            from: &email.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };
        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(value["to"], serde_json::json!(["coaches@giants.example"]));
    }
}
