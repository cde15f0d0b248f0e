use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::{
    data::{
        datasources::app_store_verify_receipt_datasource::{
            AppStoreVerifyReceiptDatasource, AppStoreVerifyReceiptDatasourceImpl,
        },
        models::app_store_verify_receipt::verify_receipt_response_model as vr,
    },
    domain::{
        entities::{
            app_receipt::AppReceipt,
            parsed_receipt::{ParsedReceipt, Purchase},
        },
        repositories::receipt_repository::ReceiptRepository,
    },
    errors::EligibilityError,
};

pub(crate) struct ReceiptRepositoryImpl<A: AppStoreVerifyReceiptDatasource> {
    app_store_verify_receipt_datasource: A,
}

#[async_trait]
impl<A: AppStoreVerifyReceiptDatasource> ReceiptRepository for ReceiptRepositoryImpl<A> {
    async fn parse_app_receipt(
        &self,
        app_receipt: &str,
    ) -> Result<ParsedReceipt, EligibilityError> {
        let app_receipt = AppReceipt::parse(app_receipt)?;
        let m = self
            .app_store_verify_receipt_datasource
            .verify_receipt(app_receipt.as_base64())
            .await?;
        ParsedReceipt::from_verify_receipt_response(m)
    }
}

impl<A: AppStoreVerifyReceiptDatasource> ReceiptRepositoryImpl<A> {
    pub(crate) fn with_datasource(app_store_verify_receipt_datasource: A) -> Self {
        Self {
            app_store_verify_receipt_datasource,
        }
    }
}

impl ReceiptRepositoryImpl<AppStoreVerifyReceiptDatasourceImpl> {
    pub(crate) fn new(
        production_url: &str,
        sandbox_url: &str,
        shared_secret: Option<SecretString>,
        exclude_old_transactions: bool,
        request_timeout: Duration,
    ) -> Result<Self, EligibilityError> {
        Ok(Self::with_datasource(
            AppStoreVerifyReceiptDatasourceImpl::new(
                production_url,
                sandbox_url,
                shared_secret,
                exclude_old_transactions,
                request_timeout,
            )?,
        ))
    }
}

impl ParsedReceipt {
    fn from_verify_receipt_response(
        m: vr::VerifyReceiptResponseModel,
    ) -> Result<Self, EligibilityError> {
        if !m.status.has_usable_receipt() {
            return Err(EligibilityError::ReceiptRejected {
                status: m.status.code(),
                message: m.status.description().to_owned(),
            });
        }
        let receipt = m.receipt.ok_or_else(|| {
            EligibilityError::AppStoreInvalidResponse(
                "Response did not contain a receipt.".to_owned(),
            )
        })?;
        Ok(ParsedReceipt::new(
            receipt
                .in_app
                .into_iter()
                .map(Purchase::from_in_app_purchase_model)
                .collect(),
        ))
    }
}

impl Purchase {
    fn from_in_app_purchase_model(m: vr::InAppPurchaseModel) -> Self {
        Purchase {
            original_transaction_id: m.original_transaction_id,
            transaction_id: m.transaction_id,
            product_id: m.product_id,
            purchase_time: m.purchase_date_ms.and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}
