//! HTTP surface: the subscription eligibility endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{EligibilityRequest, ErrorBody, ErrorResponse};
pub use handlers::{check_eligibility, EligibilityAppState};
pub use routes::{eligibility_router, eligibility_routes, ELIGIBILITY_PATH};
