use std::path::Path;

use async_trait::async_trait;

use crate::{
    data::{
        datasources::user_store_datasource::{
            JsonFileUserStoreDatasourceImpl, UserStoreDatasource,
        },
        models::user_store::user_record_model::UserRecordModel,
    },
    domain::{
        entities::user_record::{Subscription, UserRecord},
        repositories::user_repository::UserRepository,
    },
    errors::EligibilityError,
};

pub(crate) struct UserRepositoryImpl<D: UserStoreDatasource> {
    user_store_datasource: D,
}

#[async_trait]
impl<D: UserStoreDatasource> UserRepository for UserRepositoryImpl<D> {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, EligibilityError> {
        Ok(self
            .user_store_datasource
            .find_by_username(username)
            .await?
            .map(UserRecord::from_model))
    }

    async fn find_by_subscription_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<UserRecord>, EligibilityError> {
        Ok(self
            .user_store_datasource
            .find_by_subscription_transaction_id(transaction_id)
            .await?
            .map(UserRecord::from_model))
    }
}

impl<D: UserStoreDatasource> UserRepositoryImpl<D> {
    pub(crate) fn with_datasource(user_store_datasource: D) -> Self {
        Self {
            user_store_datasource,
        }
    }
}

impl UserRepositoryImpl<JsonFileUserStoreDatasourceImpl> {
    pub(crate) async fn new(path: &Path) -> Result<Self, EligibilityError> {
        Ok(Self::with_datasource(
            JsonFileUserStoreDatasourceImpl::load(path).await?,
        ))
    }
}

impl UserRecord {
    fn from_model(m: UserRecordModel) -> Self {
        UserRecord {
            username: m.username,
            subscription: Subscription {
                transaction_id: m.subscription.transaction_id.filter(|id| !id.is_empty()),
            },
        }
    }
}
