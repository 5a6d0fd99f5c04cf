use async_trait::async_trait;
use reqwest::StatusCode;

use super::domain::Section;
use super::values::FormValues;
use crate::workflows::fan_coach::submission::domain::{
    ErrorResponse, SendEmailPayload, SendEmailResponse, GENERIC_FAILURE_MESSAGE,
};

/// Path of the submission endpoint relative to the server base URL.
pub const SEND_EMAIL_PATH: &str = "/api/sendEmail";

/// What the submission endpoint reported for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: String,
    pub id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("submission endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("submission rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected submission response: {0}")]
    Decode(String),
}

/// Hands a completed form to whatever relays it onward.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(
        &self,
        values: &FormValues,
        sections: &[Section],
    ) -> Result<SubmissionReceipt, TransportError>;
}

/// Posts completed forms to a running submission endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), SEND_EMAIL_PATH);
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionClient {
    async fn submit(
        &self,
        values: &FormValues,
        sections: &[Section],
    ) -> Result<SubmissionReceipt, TransportError> {
        let payload = SendEmailPayload {
            form_data: values,
            form_sections: sections,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;

        if status.is_success() {
            let accepted: SendEmailResponse = serde_json::from_slice(&body)
                .map_err(|err| TransportError::Decode(err.to_string()))?;
            return Ok(SubmissionReceipt {
                message: accepted.message,
                id: accepted.id,
            });
        }

        Err(rejection(status, &body))
    }
}

fn rejection(status: StatusCode, body: &[u8]) -> TransportError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .map(|response| response.error)
        .unwrap_or_else(|_| GENERIC_FAILURE_MESSAGE.to_string());

    TransportError::Rejected {
        status: status.as_u16(),
        message,
    }
}
