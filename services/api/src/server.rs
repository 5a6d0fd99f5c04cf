use crate::cli::ServeArgs;
use crate::infra::{AppState, DryRunMailer};
use crate::routes::with_submission_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fan_coach::config::AppConfig;
use fan_coach::error::AppError;
use fan_coach::telemetry;
use fan_coach::workflows::fan_coach::submission::{MailEnvelope, ResendMailer, SubmissionService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let envelope = MailEnvelope::from_config(&config.mail);
    let submissions = if args.dry_run {
        info!(recipient = %envelope.to, "dry run enabled; e-mails will only be logged");
        let service = SubmissionService::new(Arc::new(DryRunMailer::default()), envelope);
        with_submission_routes(Arc::new(service))
    } else {
        if config.mail.api_key.is_none() {
            warn!("RESEND_API_KEY is not set; every submission will fail until it is configured");
        }
        let mailer = ResendMailer::from_config(&config.mail);
        let service = SubmissionService::new(Arc::new(mailer), envelope);
        with_submission_routes(Arc::new(service))
    };

    let app = submissions
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, dry_run = args.dry_run, "fan coach intake ready");

    axum::serve(listener, app).await?;
    Ok(())
}
