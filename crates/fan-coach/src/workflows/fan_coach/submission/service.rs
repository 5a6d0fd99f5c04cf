use std::sync::Arc;

use tracing::info;

use super::domain::SendEmailRequest;
use super::mailer::{DeliveryReceipt, MailError, MailTransport, OutboundEmail};
use super::summary::{render_summary_html, subject_line};
use crate::config::MailConfig;
use crate::workflows::fan_coach::form::{FormValues, Section};

/// Fixed sender and configured recipient for every application e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailEnvelope {
    pub from: String,
    pub to: String,
}

impl MailEnvelope {
    pub fn from_config(config: &MailConfig) -> Self {
        Self {
            from: config.sender.clone(),
            to: config.recipient.clone(),
        }
    }
}

/// Renders a submitted application and relays it through the mail transport.
#[derive(Debug)]
pub struct SubmissionService<M> {
    mailer: Arc<M>,
    envelope: MailEnvelope,
}

impl<M> SubmissionService<M>
where
    M: MailTransport + 'static,
{
    pub fn new(mailer: Arc<M>, envelope: MailEnvelope) -> Self {
        Self { mailer, envelope }
    }

    pub fn envelope(&self) -> &MailEnvelope {
        &self.envelope
    }

    /// Builds the e-mail for a request without sending it.
    pub fn compose(&self, request: &SendEmailRequest) -> Result<OutboundEmail, SubmissionError> {
        let values = request
            .form_data
            .as_ref()
            .ok_or(SubmissionError::MissingFormData)?;
        let sections = request
            .form_sections
            .as_deref()
            .ok_or(SubmissionError::MissingSections)?;

        Ok(self.compose_email(values, sections))
    }

    pub fn compose_email(&self, values: &FormValues, sections: &[Section]) -> OutboundEmail {
        OutboundEmail {
            from: self.envelope.from.clone(),
            to: self.envelope.to.clone(),
            subject: subject_line(values),
            html: render_summary_html(values, sections),
        }
    }

    /// Composes and sends one application e-mail. No retries.
    pub async fn deliver(
        &self,
        request: SendEmailRequest,
    ) -> Result<DeliveryReceipt, SubmissionError> {
        let email = self.compose(&request)?;
        let receipt = self.mailer.send(&email).await?;
        info!(
            id = ?receipt.id,
            accepted_at = %receipt.accepted_at,
            recipient = %email.to,
            "application e-mail accepted"
        );
        Ok(receipt)
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("form data is missing from the request")]
    MissingFormData,
    #[error("form sections are missing from the request")]
    MissingSections,
    #[error("request body could not be read: {0}")]
    MalformedPayload(String),
    #[error(transparent)]
    Delivery(#[from] MailError),
}

impl SubmissionError {
    /// Whether the caller sent an incomplete request rather than hitting a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SubmissionError::MissingFormData)
    }
}
