use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::errors::EligibilityError;

/// Base64-encoded App Store receipt, as uploaded by the device.
///
/// The receipt is opaque to us; the only local check is that it decodes as
/// base64; everything else is left to the App Store.
#[derive(Clone, PartialEq, Eq)]
pub struct AppReceipt(String);

impl AppReceipt {
    /// Whitespace is stripped first, since iOS clients commonly send the
    /// receipt wrapped at 64 or 76 columns.
    pub fn parse(raw: &str) -> Result<Self, EligibilityError> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(EligibilityError::InvalidAppReceipt(
                "receipt is empty".to_owned(),
            ));
        }
        STANDARD.decode(&compact).map_err(|e| {
            EligibilityError::InvalidAppReceipt(format!("receipt is not valid base64; {}", e))
        })?;
        Ok(Self(compact))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppReceipt(<{} chars>)", self.0.len())
    }
}
