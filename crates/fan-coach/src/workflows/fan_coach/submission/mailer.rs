use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A rendered message ready for the delivery provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub id: Option<String>,
    pub accepted_at: DateTime<Utc>,
}

impl DeliveryReceipt {
    pub fn accepted(id: Option<String>) -> Self {
        Self {
            id,
            accepted_at: Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail API key is not configured")]
    MissingApiKey,
    #[error("mail provider rejected the message with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("mail provider unreachable: {0}")]
    Transport(String),
    #[error("unexpected mail provider response: {0}")]
    Decode(String),
}

/// Outbound delivery hook so the submission service can run against fakes.
#[async_trait]
pub trait MailTransport: Debug + Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailError>;
}
