//! App Store verifyReceipt configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;
use crate::data::datasources::app_store_verify_receipt_datasource::{
    PRODUCTION_VERIFY_RECEIPT_URL, SANDBOX_VERIFY_RECEIPT_URL,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppStoreConfig {
    /// App-specific shared secret, required for receipts that contain
    /// auto-renewable subscriptions
    pub shared_secret: Option<SecretString>,

    /// Ask the App Store to return only the latest renewal of each
    /// subscription
    #[serde(default)]
    pub exclude_old_transactions: bool,

    /// Timeout for each verifyReceipt callout, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_production_url")]
    pub production_url: String,

    #[serde(default = "default_sandbox_url")]
    pub sandbox_url: String,
}

impl AppStoreConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        for url in [&self.production_url, &self.sandbox_url] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ValidationError::InvalidAppStoreUrl(url.clone()));
            }
        }
        Ok(())
    }
}

impl Default for AppStoreConfig {
    fn default() -> Self {
        Self {
            shared_secret: None,
            exclude_old_transactions: false,
            request_timeout_secs: default_request_timeout(),
            production_url: default_production_url(),
            sandbox_url: default_sandbox_url(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_production_url() -> String {
    PRODUCTION_VERIFY_RECEIPT_URL.to_string()
}

fn default_sandbox_url() -> String {
    SANDBOX_VERIFY_RECEIPT_URL.to_string()
}
