#![allow(dead_code)]

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

use super::common::{Environment, VerifyReceiptStatusField};

/// Response body of the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// Only the fields needed to identify purchases are modelled.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyReceiptResponseModel {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error.
    pub(crate) status: VerifyReceiptStatusField,
    /// The environment for which the receipt was generated.
    pub(crate) environment: Option<Environment>,
    /// An indicator that an error occurred during the request.
    #[serde(rename = "is-retryable", default)]
    pub(crate) is_retryable: bool,
    /// The decoded receipt. Absent when the status is an error.
    pub(crate) receipt: Option<ReceiptModel>,
}

/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
#[derive(Debug, Deserialize)]
pub(crate) struct ReceiptModel {
    /// The bundle identifier for the app to which the receipt belongs.
    pub(crate) bundle_id: Option<String>,
    /// The in-app purchase receipt fields for all in-app purchase
    /// transactions.
    #[serde(default)]
    pub(crate) in_app: Vec<InAppPurchaseModel>,
}

/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct InAppPurchaseModel {
    /// The transaction identifier of the original purchase.
    pub(crate) original_transaction_id: String,
    /// A unique identifier for a transaction such as a purchase, restore, or
    /// renewal.
    pub(crate) transaction_id: Option<String>,
    /// The unique identifier of the product purchased.
    pub(crate) product_id: Option<String>,
    /// The time the App Store charged the user's account, in UNIX epoch time
    /// milliseconds (sent as a string).
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub(crate) purchase_date_ms: Option<i64>,
    /// The time a subscription expires or when it will renew, in UNIX epoch
    /// time milliseconds (sent as a string).
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub(crate) expires_date_ms: Option<i64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::models::app_store_verify_receipt::common::VerifyReceiptStatus;

    #[test]
    fn parses_receipt_with_purchases_in_order() {
        let m: VerifyReceiptResponseModel = serde_json::from_value(json!({
            "status": 0,
            "environment": "Sandbox",
            "receipt": {
                "bundle_id": "io.fractic.app",
                "in_app": [
                    {
                        "original_transaction_id": "1000000001",
                        "transaction_id": "1000000005",
                        "product_id": "premium_monthly",
                        "purchase_date_ms": "1700000000000"
                    },
                    { "original_transaction_id": "1000000002" }
                ]
            }
        }))
        .unwrap();
        assert_eq!(m.status, VerifyReceiptStatusField::Known(VerifyReceiptStatus::Valid));
        assert_eq!(m.environment, Some(Environment::Sandbox));
        let receipt = m.receipt.unwrap();
        assert_eq!(receipt.in_app.len(), 2);
        assert_eq!(receipt.in_app[0].original_transaction_id, "1000000001");
        assert_eq!(receipt.in_app[0].purchase_date_ms, Some(1_700_000_000_000));
        assert_eq!(receipt.in_app[1].purchase_date_ms, None);
    }

    #[test]
    fn parses_error_response_without_receipt() {
        let m: VerifyReceiptResponseModel =
            serde_json::from_value(json!({ "status": 21002, "is-retryable": true })).unwrap();
        assert!(m.receipt.is_none());
        assert!(m.is_retryable);
        assert_eq!(m.status.code(), 21002);
    }
}
