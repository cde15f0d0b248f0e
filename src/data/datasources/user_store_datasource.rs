use std::{collections::HashMap, path::Path};

use async_trait::async_trait;

use crate::{data::models::user_store::user_record_model::UserRecordModel, errors::EligibilityError};

#[async_trait]
pub(crate) trait UserStoreDatasource: Send + Sync {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecordModel>, EligibilityError>;

    async fn find_by_subscription_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<UserRecordModel>, EligibilityError>;
}

/// Subscriber records loaded once from a JSON file and indexed in memory.
pub(crate) struct JsonFileUserStoreDatasourceImpl {
    by_username: HashMap<String, UserRecordModel>,
    username_by_transaction_id: HashMap<String, String>,
}

#[async_trait]
impl UserStoreDatasource for JsonFileUserStoreDatasourceImpl {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecordModel>, EligibilityError> {
        Ok(self.by_username.get(username).cloned())
    }

    async fn find_by_subscription_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<UserRecordModel>, EligibilityError> {
        Ok(self
            .username_by_transaction_id
            .get(transaction_id)
            .and_then(|username| self.by_username.get(username))
            .cloned())
    }
}

impl JsonFileUserStoreDatasourceImpl {
    pub(crate) async fn load(path: &Path) -> Result<Self, EligibilityError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            EligibilityError::user_store_with_debug(
                "Failed to read user store file.",
                format!("{}; {:?}", path.display(), e),
            )
        })?;
        let records: Vec<UserRecordModel> = serde_json::from_str(&contents).map_err(|e| {
            EligibilityError::user_store_with_debug(
                "Failed to parse user store file.",
                format!("{}; {:?}", path.display(), e),
            )
        })?;
        Self::from_records(records)
    }

    pub(crate) fn from_records(records: Vec<UserRecordModel>) -> Result<Self, EligibilityError> {
        let mut by_username = HashMap::with_capacity(records.len());
        let mut username_by_transaction_id = HashMap::new();
        for record in records {
            if let Some(transaction_id) = record
                .subscription
                .transaction_id
                .as_ref()
                .filter(|id| !id.is_empty())
            {
                // A transaction bound to two accounts would make every
                // decision on it ambiguous.
                if let Some(other) = username_by_transaction_id
                    .insert(transaction_id.clone(), record.username.clone())
                {
                    return Err(EligibilityError::user_store_with_debug(
                        "Transaction ID is bound to more than one user.",
                        format!("{}; {}; {}", transaction_id, other, record.username),
                    ));
                }
            }
            let username = record.username.clone();
            if by_username.insert(username.clone(), record).is_some() {
                return Err(EligibilityError::user_store_with_debug(
                    "Duplicate username in user store.",
                    username,
                ));
            }
        }
        Ok(Self {
            by_username,
            username_by_transaction_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    fn records(value: serde_json::Value) -> Vec<UserRecordModel> {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn indexes_by_username_and_transaction_id() {
        let ds = JsonFileUserStoreDatasourceImpl::from_records(records(json!([
            { "username": "alice", "subscription": { "transactionId": "1000000001" } },
            { "username": "bob", "subscription": {} },
            { "username": "carol" }
        ])))
        .unwrap();

        let alice = ds.find_by_subscription_transaction_id("1000000001").await.unwrap();
        assert_eq!(alice.unwrap().username, "alice");
        assert!(ds.find_by_username("bob").await.unwrap().is_some());
        assert!(ds.find_by_username("carol").await.unwrap().is_some());
        assert!(ds.find_by_username("dave").await.unwrap().is_none());
        assert!(ds
            .find_by_subscription_transaction_id("1000000002")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn empty_transaction_id_is_not_indexed() {
        let ds = JsonFileUserStoreDatasourceImpl::from_records(records(json!([
            { "username": "alice", "subscription": { "transactionId": "" } }
        ])))
        .unwrap();
        assert!(ds.find_by_subscription_transaction_id("").await.unwrap().is_none());
    }

    #[test]
    fn rejects_transaction_bound_to_two_users() {
        let result = JsonFileUserStoreDatasourceImpl::from_records(records(json!([
            { "username": "alice", "subscription": { "transactionId": "1000000001" } },
            { "username": "bob", "subscription": { "transactionId": "1000000001" } }
        ])));
        assert!(matches!(result, Err(EligibilityError::UserStore { .. })));
    }

    #[test]
    fn rejects_duplicate_username() {
        let result = JsonFileUserStoreDatasourceImpl::from_records(records(json!([
            { "username": "alice" },
            { "username": "alice" }
        ])));
        assert!(matches!(result, Err(EligibilityError::UserStore { .. })));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "username": "alice", "subscription": {{ "transactionId": "1000000001" }} }}]"#
        )
        .unwrap();
        let ds = JsonFileUserStoreDatasourceImpl::load(file.path()).await.unwrap();
        assert!(ds.find_by_username("alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_file_is_a_user_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonFileUserStoreDatasourceImpl::load(&dir.path().join("users.json")).await;
        assert!(matches!(result, Err(EligibilityError::UserStore { .. })));
    }
}
