use serde::Serialize;

/// Request body of the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
pub(crate) struct VerifyReceiptRequestModel<'a> {
    /// The Base64-encoded receipt data.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: &'a str,
    /// The app's shared secret, required for receipts containing
    /// auto-renewable subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<&'a str>,
    /// Only return the latest renewal transaction for each subscription.
    #[serde(rename = "exclude-old-transactions")]
    pub(crate) exclude_old_transactions: bool,
}
