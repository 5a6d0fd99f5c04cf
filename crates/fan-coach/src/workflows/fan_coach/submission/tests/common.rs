use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::fan_coach::form::{FormBlueprint, FormValues, Section};
use crate::workflows::fan_coach::submission::domain::SendEmailRequest;
use crate::workflows::fan_coach::submission::mailer::{
    DeliveryReceipt, MailError, MailTransport, OutboundEmail,
};
use crate::workflows::fan_coach::submission::service::{MailEnvelope, SubmissionService};
use crate::workflows::fan_coach::submission::submission_router;

#[derive(Debug, Default, Clone)]
pub(super) struct MemoryMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl MemoryMailer {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

#[async_trait]
impl MailTransport for MemoryMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailError> {
        let mut guard = self.sent.lock().expect("mailer mutex poisoned");
        guard.push(email.clone());
        Ok(DeliveryReceipt::accepted(Some(format!(
            "email-{:03}",
            guard.len()
        ))))
    }
}

#[derive(Debug, Default)]
pub(super) struct RejectingMailer;

#[async_trait]
impl MailTransport for RejectingMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<DeliveryReceipt, MailError> {
        Err(MailError::Rejected {
            status: 422,
            message: "The `from` domain is not verified".to_string(),
        })
    }
}

pub(super) fn envelope() -> MailEnvelope {
    MailEnvelope {
        from: "Chicago Giants <onboarding@resend.dev>".to_string(),
        to: "coach-desk@giants.example".to_string(),
    }
}

pub(super) fn sections() -> Vec<Section> {
    FormBlueprint::standard().sections().to_vec()
}

pub(super) fn complete_values() -> FormValues {
    sections()
        .iter()
        .flat_map(|section| section.questions.iter())
        .filter(|question| question.required)
        .map(|question| {
            let value = match question.id.as_str() {
                "fullName" => "Dana Ortiz".to_string(),
                "email" => "dana@example.com".to_string(),
                "sex" => "Female".to_string(),
                "maritalStatus" => "Single".to_string(),
                "age" => "31".to_string(),
                "weeklyHours" => "12".to_string(),
                other => format!("answer for {other}"),
            };
            (question.id.clone(), value)
        })
        .collect()
}

pub(super) fn request() -> SendEmailRequest {
    SendEmailRequest {
        form_data: Some(complete_values()),
        form_sections: Some(sections()),
    }
}

pub(super) fn build_service() -> (SubmissionService<MemoryMailer>, MemoryMailer) {
    let mailer = MemoryMailer::default();
    let service = SubmissionService::new(Arc::new(mailer.clone()), envelope());
    (service, mailer)
}

pub(super) fn router_with_service<M>(service: SubmissionService<M>) -> axum::Router
where
    M: MailTransport + 'static,
{
    submission_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
