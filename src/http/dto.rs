//! Request and response bodies of the eligibility endpoint.

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::EligibilityError;

/// Eligibility request, accepted either as a form or as a JSON body.
///
/// Absent fields read as empty strings and are left to the decider, so a
/// request without a receipt gets the receipt error body rather than a
/// rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityRequest {
    /// The account asking to subscribe.
    #[serde(default)]
    pub username: String,
    /// Base64 app receipt from the device.
    #[serde(default)]
    pub app_receipt: String,
}

#[axum::async_trait]
impl<S> FromRequest<S> for EligibilityRequest
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);
        if is_json {
            let Json(body) = Json::<Self>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(body)
        } else {
            let Form(body) = Form::<Self>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(body)
        }
    }
}

/// Body returned when the receipt could not be verified:
/// `{ "error": { "message": ..., "status": ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    /// App Store status code, when the App Store rejected the receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

impl From<&EligibilityError> for ErrorResponse {
    fn from(e: &EligibilityError) -> Self {
        Self {
            error: ErrorBody {
                message: e.to_string(),
                status: e.status(),
            },
        }
    }
}
