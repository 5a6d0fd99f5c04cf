use async_trait::async_trait;
use fan_coach::workflows::fan_coach::submission::{
    DeliveryReceipt, MailError, MailTransport, OutboundEmail,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mailer for local runs: logs each message and acknowledges it with a synthetic id.
#[derive(Debug, Default)]
pub(crate) struct DryRunMailer {
    sequence: AtomicU64,
    #[cfg(test)]
    outbox: Mutex<Vec<OutboundEmail>>,
}

impl DryRunMailer {
    #[cfg(test)]
    pub(crate) fn outbox(&self) -> Vec<OutboundEmail> {
        self.outbox.lock().expect("outbox mutex poisoned").clone()
    }
}

#[async_trait]
impl MailTransport for DryRunMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("dry-run-{id:06}");
        info!(
            %id,
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "dry run: e-mail not sent"
        );
        #[cfg(test)]
        self.outbox
            .lock()
            .expect("outbox mutex poisoned")
            .push(email.clone());
        Ok(DeliveryReceipt::accepted(Some(id)))
    }
}
