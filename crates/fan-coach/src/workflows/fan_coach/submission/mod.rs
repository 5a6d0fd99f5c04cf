//! Server side of the intake: renders a finished application as HTML and
//! relays it through the transactional mail provider.

pub mod domain;
pub mod mailer;
pub mod resend;
pub mod router;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use domain::{ErrorResponse, SendEmailRequest, SendEmailResponse};
pub use mailer::{DeliveryReceipt, MailError, MailTransport, OutboundEmail};
pub use resend::ResendMailer;
pub use router::submission_router;
pub use service::{MailEnvelope, SubmissionError, SubmissionService};
pub use summary::{render_summary_html, subject_line};
