//! HTTP handler for the eligibility endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{EligibilityRequest, ErrorResponse};
use crate::{
    decider::EligibilityDecider,
    domain::repositories::{receipt_repository::ReceiptRepository, user_repository::UserRepository},
};

/// Shared state handed to every request.
pub struct EligibilityAppState<R: ReceiptRepository, U: UserRepository> {
    pub decider: Arc<EligibilityDecider<R, U>>,
}

impl<R: ReceiptRepository, U: UserRepository> EligibilityAppState<R, U> {
    pub fn new(decider: Arc<EligibilityDecider<R, U>>) -> Self {
        Self { decider }
    }
}

impl<R: ReceiptRepository, U: UserRepository> Clone for EligibilityAppState<R, U> {
    fn clone(&self) -> Self {
        Self {
            decider: self.decider.clone(),
        }
    }
}

/// `POST /api/user/subscribe/eligibility/`
///
/// Always answers 200; whether the receipt is usable, or why it could not be
/// verified, is carried in the body.
pub async fn check_eligibility<R, U>(
    State(state): State<EligibilityAppState<R, U>>,
    request: EligibilityRequest,
) -> Response
where
    R: ReceiptRepository + 'static,
    U: UserRepository + 'static,
{
    match state
        .decider
        .decide(&request.username, &request.app_receipt)
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(e) => Json(ErrorResponse::from(&e)).into_response(),
    }
}
