#![allow(dead_code)]

use serde::Deserialize;
use serde_repr::Deserialize_repr;

#[derive(Debug, PartialEq, Deserialize)]
pub(crate) enum Environment {
    /// The receipt was generated in the sandbox environment.
    Sandbox,
    /// The receipt was generated in the production environment.
    Production,

    #[serde(untagged)]
    Unknown(String),
}

/// Status codes returned by the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr)]
#[repr(i32)]
pub(crate) enum VerifyReceiptStatus {
    /// The receipt is valid.
    Valid = 0,
    /// The request to the App Store was not made using the HTTP POST request
    /// method.
    NotPost = 21000,
    /// This status code is no longer sent by the App Store.
    NoLongerSent = 21001,
    /// The data in the receipt-data property was malformed or the service
    /// experienced a temporary issue.
    MalformedReceiptData = 21002,
    /// The receipt could not be authenticated.
    NotAuthenticated = 21003,
    /// The shared secret you provided does not match the shared secret on file
    /// for your account.
    SharedSecretMismatch = 21004,
    /// The receipt server was temporarily unable to provide the receipt.
    ServerUnavailable = 21005,
    /// This receipt is valid but the subscription has expired. The receipt is
    /// still decoded and returned.
    SubscriptionExpired = 21006,
    /// This receipt is from the test environment, but it was sent to the
    /// production environment for verification.
    SandboxReceiptSentToProduction = 21007,
    /// This receipt is from the production environment, but it was sent to
    /// the test environment for verification.
    ProductionReceiptSentToSandbox = 21008,
    /// Internal data access error.
    InternalDataAccessError = 21009,
    /// The user account cannot be found or has been deleted.
    UserAccountNotFound = 21010,
}

/// Status field as it appears on the wire. Codes in the 21100-21199 range are
/// undocumented internal errors and land in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum VerifyReceiptStatusField {
    Known(VerifyReceiptStatus),
    Unknown(i64),
}

impl VerifyReceiptStatusField {
    pub(crate) fn code(&self) -> i64 {
        match self {
            Self::Known(status) => *status as i64,
            Self::Unknown(code) => *code,
        }
    }

    /// Whether the response carries a decoded receipt that can be used.
    pub(crate) fn has_usable_receipt(&self) -> bool {
        matches!(
            self,
            Self::Known(VerifyReceiptStatus::Valid)
                | Self::Known(VerifyReceiptStatus::SubscriptionExpired)
        )
    }

    pub(crate) fn description(&self) -> &'static str {
        match self {
            Self::Known(VerifyReceiptStatus::Valid) => "The receipt is valid.",
            Self::Known(VerifyReceiptStatus::NotPost) => {
                "The request to the App Store was not made using the HTTP POST request method."
            }
            Self::Known(VerifyReceiptStatus::NoLongerSent) => {
                "This status code is no longer sent by the App Store."
            }
            Self::Known(VerifyReceiptStatus::MalformedReceiptData) => {
                "The data in the receipt-data property was malformed or missing."
            }
            Self::Known(VerifyReceiptStatus::NotAuthenticated) => {
                "The receipt could not be authenticated."
            }
            Self::Known(VerifyReceiptStatus::SharedSecretMismatch) => {
                "The shared secret does not match the shared secret on file for the account."
            }
            Self::Known(VerifyReceiptStatus::ServerUnavailable) => {
                "The receipt server is not currently available."
            }
            Self::Known(VerifyReceiptStatus::SubscriptionExpired) => {
                "This receipt is valid but the subscription has expired."
            }
            Self::Known(VerifyReceiptStatus::SandboxReceiptSentToProduction) => {
                "This receipt is from the test environment, but it was sent to the production environment for verification."
            }
            Self::Known(VerifyReceiptStatus::ProductionReceiptSentToSandbox) => {
                "This receipt is from the production environment, but it was sent to the test environment for verification."
            }
            Self::Known(VerifyReceiptStatus::InternalDataAccessError) => {
                "Internal data access error."
            }
            Self::Known(VerifyReceiptStatus::UserAccountNotFound) => {
                "The user account cannot be found or has been deleted."
            }
            Self::Unknown(_) => "The App Store could not process the request.",
        }
    }
}
