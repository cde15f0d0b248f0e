use std::fmt::Debug;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityError {
    /// The receipt blob was rejected before any callout was made.
    #[error("Invalid app receipt: {0}")]
    InvalidAppReceipt(String),

    /// The verifyReceipt endpoint could not be reached, or answered with
    /// something other than a JSON body.
    #[error("Error calling out to App Store verifyReceipt endpoint: {message}")]
    AppStoreCallout { message: String, debug: String },

    /// The verifyReceipt endpoint answered, but with a non-success status.
    #[error("App Store rejected the receipt: {message}")]
    ReceiptRejected { status: i64, message: String },

    #[error("App Store returned an invalid response: {0}")]
    AppStoreInvalidResponse(String),

    #[error("User store error: {message}")]
    UserStore { message: String, debug: String },
}

impl EligibilityError {
    pub(crate) fn callout_with_debug(message: &str, debug: impl Debug) -> Self {
        Self::AppStoreCallout {
            message: message.to_owned(),
            debug: format!("{:?}", debug),
        }
    }

    pub(crate) fn user_store_with_debug(message: &str, debug: impl Debug) -> Self {
        Self::UserStore {
            message: message.to_owned(),
            debug: format!("{:?}", debug),
        }
    }

    /// App Store status code, when the failure came from a verifyReceipt
    /// response.
    pub fn status(&self) -> Option<i64> {
        match self {
            Self::ReceiptRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Debug detail that is logged but never sent back to the client.
    pub fn debug_detail(&self) -> Option<&str> {
        match self {
            Self::AppStoreCallout { debug, .. } | Self::UserStore { debug, .. } => Some(debug),
            _ => None,
        }
    }
}
