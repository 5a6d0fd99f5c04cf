use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use fan_coach::workflows::fan_coach::form::{FormBlueprint, Section};
use fan_coach::workflows::fan_coach::submission::{
    submission_router, MailTransport, SubmissionService,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_submission_routes<M>(service: Arc<SubmissionService<M>>) -> Router
where
    M: MailTransport + 'static,
{
    submission_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/form", get(form_definition_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The six-step questionnaire the wizard renders, in display order.
pub(crate) async fn form_definition_endpoint() -> Json<&'static [Section]> {
    Json(FormBlueprint::standard().sections())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::DryRunMailer;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use fan_coach::workflows::fan_coach::submission::MailEnvelope;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> (Router, Arc<DryRunMailer>) {
        let mailer = Arc::new(DryRunMailer::default());
        let envelope = MailEnvelope {
            from: "Chicago Giants <onboarding@resend.dev>".to_string(),
            to: "your-email@example.com".to_string(),
        };
        let service = Arc::new(SubmissionService::new(mailer.clone(), envelope));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        (
            with_submission_routes(service).layer(Extension(state)),
            mailer,
        )
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let (router, _) = app(false);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn form_endpoint_serves_standard_sections() {
        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/api/form").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let sections = body.as_array().expect("array of sections");
        assert_eq!(sections.len(), 6);
        assert_eq!(sections[0]["title"], "Personal Details");
        assert_eq!(sections[0]["questions"][0]["id"], "fullName");
        assert_eq!(sections[0]["questions"][0]["type"], "text");
    }

    #[tokio::test]
    async fn send_email_runs_through_dry_run_mailer() {
        let (router, mailer) = app(true);
        let payload = json!({
            "formData": { "fullName": "Dana Reyes" },
            "formSections": FormBlueprint::standard().sections(),
        });
        let request = Request::post("/api/sendEmail")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["id"], "dry-run-000001");

        let outbox = mailer.outbox();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].subject, "New Fan Coach Application from Dana Reyes");
    }
}
