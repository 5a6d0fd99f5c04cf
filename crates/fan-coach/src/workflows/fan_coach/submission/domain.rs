use serde::{Deserialize, Serialize};

use crate::workflows::fan_coach::form::{FormValues, Section};

pub const SUCCESS_MESSAGE: &str = "Email sent successfully";
pub const MISSING_FORM_DATA_MESSAGE: &str = "Form data is required";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to send email";

/// Body accepted by `POST /api/sendEmail`. Both fields are optional on the
/// wire so a missing payload can be answered with a 400 instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    pub form_data: Option<FormValues>,
    #[serde(default)]
    pub form_sections: Option<Vec<Section>>,
}

/// Borrowed request body used by clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailPayload<'a> {
    pub form_data: &'a FormValues,
    pub form_sections: &'a [Section],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SendEmailResponse {
    pub fn delivered(id: Option<String>) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
