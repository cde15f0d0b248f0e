use async_trait::async_trait;

use crate::{domain::entities::parsed_receipt::ParsedReceipt, errors::EligibilityError};

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    /// Verify a base64 app receipt with the App Store and return its
    /// contents.
    ///
    /// app_receipt:
    ///   The receipt exactly as uploaded by the device. It is validated
    ///   locally before any callout.
    async fn parse_app_receipt(&self, app_receipt: &str)
        -> Result<ParsedReceipt, EligibilityError>;
}

#[async_trait]
impl<T: ReceiptRepository + ?Sized> ReceiptRepository for Box<T> {
    async fn parse_app_receipt(
        &self,
        app_receipt: &str,
    ) -> Result<ParsedReceipt, EligibilityError> {
        (**self).parse_app_receipt(app_receipt).await
    }
}
