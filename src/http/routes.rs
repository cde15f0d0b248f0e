//! Axum router for the eligibility endpoint.

use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{check_eligibility, EligibilityAppState};
use crate::{
    decider::EligibilityDecider,
    domain::repositories::{receipt_repository::ReceiptRepository, user_repository::UserRepository},
};

pub const ELIGIBILITY_PATH: &str = "/api/user/subscribe/eligibility/";

/// Routes, without state. The path is also served without its trailing
/// slash, which existing clients use interchangeably.
pub fn eligibility_routes<R, U>() -> Router<EligibilityAppState<R, U>>
where
    R: ReceiptRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route(ELIGIBILITY_PATH, post(check_eligibility::<R, U>))
        .route(
            ELIGIBILITY_PATH.trim_end_matches('/'),
            post(check_eligibility::<R, U>),
        )
}

/// Complete router with state and request tracing, ready to serve.
pub fn eligibility_router<R, U>(decider: Arc<EligibilityDecider<R, U>>) -> Router
where
    R: ReceiptRepository + 'static,
    U: UserRepository + 'static,
{
    eligibility_routes()
        .with_state(EligibilityAppState::new(decider))
        .layer(TraceLayer::new_for_http())
}
