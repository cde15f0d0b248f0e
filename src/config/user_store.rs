//! User store configuration

use std::path::PathBuf;

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct UserStoreConfig {
    /// JSON file holding the subscriber records
    pub path: PathBuf,
}

impl UserStoreConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("user_store.path"));
        }
        Ok(())
    }
}
