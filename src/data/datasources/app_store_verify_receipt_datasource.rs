use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{
    data::models::app_store_verify_receipt::{
        common::{VerifyReceiptStatus, VerifyReceiptStatusField},
        verify_receipt_request_model::VerifyReceiptRequestModel,
        verify_receipt_response_model::VerifyReceiptResponseModel,
    },
    errors::EligibilityError,
};

pub(crate) const PRODUCTION_VERIFY_RECEIPT_URL: &str =
    "https://buy.itunes.apple.com/verifyReceipt";
pub(crate) const SANDBOX_VERIFY_RECEIPT_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";

#[async_trait]
pub(crate) trait AppStoreVerifyReceiptDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// receipt_data:
    ///   The Base64-encoded receipt data.
    ///
    /// Returns the raw response; a non-zero status is not treated as an error
    /// at this level.
    async fn verify_receipt(
        &self,
        receipt_data: &str,
    ) -> Result<VerifyReceiptResponseModel, EligibilityError>;
}

pub(crate) struct AppStoreVerifyReceiptDatasourceImpl {
    client: Client,
    production_url: String,
    sandbox_url: String,
    shared_secret: Option<SecretString>,
    exclude_old_transactions: bool,
}

#[async_trait]
impl AppStoreVerifyReceiptDatasource for AppStoreVerifyReceiptDatasourceImpl {
    async fn verify_receipt(
        &self,
        receipt_data: &str,
    ) -> Result<VerifyReceiptResponseModel, EligibilityError> {
        let body = VerifyReceiptRequestModel {
            receipt_data,
            password: self
                .shared_secret
                .as_ref()
                .map(|secret| secret.expose_secret().as_str()),
            exclude_old_transactions: self.exclude_old_transactions,
        };
        self.callout_with_sandbox_fallback(&body).await
    }
}

impl AppStoreVerifyReceiptDatasourceImpl {
    pub(crate) fn new(
        production_url: &str,
        sandbox_url: &str,
        shared_secret: Option<SecretString>,
        exclude_old_transactions: bool,
        request_timeout: Duration,
    ) -> Result<Self, EligibilityError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| EligibilityError::callout_with_debug("Failed to build HTTP client.", e))?;
        Ok(Self {
            client,
            production_url: production_url.to_owned(),
            sandbox_url: sandbox_url.to_owned(),
            shared_secret,
            exclude_old_transactions,
        })
    }

    async fn callout_with_sandbox_fallback(
        &self,
        body: &VerifyReceiptRequestModel<'_>,
    ) -> Result<VerifyReceiptResponseModel, EligibilityError> {
        // As per Apple's documentation, always verify against production
        // first, and only retry against the sandbox if production reports the
        // receipt as a sandbox receipt.
        let production_response = self.callout(&self.production_url, body).await?;
        if production_response.status
            == VerifyReceiptStatusField::Known(VerifyReceiptStatus::SandboxReceiptSentToProduction)
        {
            debug!("Sandbox receipt sent to production; retrying against sandbox.");
            return self.callout(&self.sandbox_url, body).await;
        }
        Ok(production_response)
    }

    async fn callout(
        &self,
        url: &str,
        body: &VerifyReceiptRequestModel<'_>,
    ) -> Result<VerifyReceiptResponseModel, EligibilityError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                EligibilityError::callout_with_debug(
                    "Callout failed to send.",
                    format!("verifyReceipt; {}; {:?}", url, e),
                )
            })?;

        if !response.status().is_success() {
            return Err(EligibilityError::callout_with_debug(
                "Callout returned with non-200 status code.",
                format!(
                    "verifyReceipt; {}; {}; {}",
                    url,
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        response.json().await.map_err(|e| {
            EligibilityError::callout_with_debug(
                "Failed to parse callout response.",
                format!("verifyReceipt; {}; {:?}", url, e),
            )
        })
    }
}
