use async_trait::async_trait;

use crate::{domain::entities::user_record::UserRecord, errors::EligibilityError};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserRecord>, EligibilityError>;

    /// Find the account whose subscription is bound to the given original
    /// transaction ID. At most one account can be bound to a transaction.
    async fn find_by_subscription_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<UserRecord>, EligibilityError>;
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Box<T> {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, EligibilityError> {
        (**self).find_by_username(username).await
    }

    async fn find_by_subscription_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<UserRecord>, EligibilityError> {
        (**self)
            .find_by_subscription_transaction_id(transaction_id)
            .await
    }
}
