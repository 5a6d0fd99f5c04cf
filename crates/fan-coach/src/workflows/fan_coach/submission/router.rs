use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::error;

use super::domain::{
    ErrorResponse, SendEmailRequest, SendEmailResponse, GENERIC_FAILURE_MESSAGE,
    MISSING_FORM_DATA_MESSAGE,
};
use super::mailer::MailTransport;
use super::service::{SubmissionError, SubmissionService};
use crate::workflows::fan_coach::form::transport::SEND_EMAIL_PATH;

/// Router exposing the application e-mail endpoint.
pub fn submission_router<M>(service: Arc<SubmissionService<M>>) -> Router
where
    M: MailTransport + 'static,
{
    Router::new()
        .route(SEND_EMAIL_PATH, post(send_email_handler::<M>))
        .with_state(service)
}

/// Reads the body as JSON whatever its content type says.
pub(crate) async fn send_email_handler<M>(
    State(service): State<Arc<SubmissionService<M>>>,
    body: Bytes,
) -> Response
where
    M: MailTransport + 'static,
{
    let result = match serde_json::from_slice::<SendEmailRequest>(&body) {
        Ok(request) => service.deliver(request).await,
        Err(err) => Err(SubmissionError::MalformedPayload(err.to_string())),
    };

    match result {
        Ok(receipt) => (
            StatusCode::OK,
            Json(SendEmailResponse::delivered(receipt.id)),
        )
            .into_response(),
        Err(err) if err.is_client_error() => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(MISSING_FORM_DATA_MESSAGE)),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to send application e-mail");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(GENERIC_FAILURE_MESSAGE)),
            )
                .into_response()
        }
    }
}
