use std::time::Duration;

use tracing::{error, info, warn};

use crate::{
    config::AppConfig,
    data::repositories::{
        receipt_repository_impl::ReceiptRepositoryImpl, user_repository_impl::UserRepositoryImpl,
    },
    domain::{
        entities::{
            eligibility::{EligibilityReason, EligibilityResult},
            parsed_receipt::ParsedReceipt,
        },
        repositories::{receipt_repository::ReceiptRepository, user_repository::UserRepository},
    },
    errors::EligibilityError,
};

/// Decides whether an App Store receipt may be used by a given account.
///
/// An app receipt is unique per Apple ID, and an Apple ID's subscription can
/// only back one account at a time. The decider checks that the receipt's
/// purchase is not already claimed by a different account, and that the
/// requesting account is not already bound to a different purchase.
pub struct EligibilityDecider<R: ReceiptRepository, U: UserRepository> {
    receipt_repository: R,
    user_repository: U,
}

impl<R: ReceiptRepository, U: UserRepository> EligibilityDecider<R, U> {
    pub fn with_repositories(receipt_repository: R, user_repository: U) -> Self {
        Self {
            receipt_repository,
            user_repository,
        }
    }

    /// Receipt verification failures are returned as-is. Ineligibility is not
    /// an error; it is an `Ok` result with `available() == false`.
    #[tracing::instrument(name = "eligibility", skip(self, app_receipt))]
    pub async fn decide(
        &self,
        username: &str,
        app_receipt: &str,
    ) -> Result<EligibilityResult, EligibilityError> {
        let receipt = self
            .receipt_repository
            .parse_app_receipt(app_receipt)
            .await
            .map_err(|e| {
                error!(status = e.status(), debug = e.debug_detail(), "{}", e);
                e
            })?;

        let reason = self
            .decide_for_receipt(username, &receipt)
            .await
            .map_err(|e| {
                error!(debug = e.debug_detail(), "{}", e);
                e
            })?;

        if reason.is_available() {
            info!(?reason, "{}", reason.description());
        } else {
            warn!(?reason, "{}", reason.description());
        }
        Ok(EligibilityResult::from(reason))
    }

    async fn decide_for_receipt(
        &self,
        username: &str,
        receipt: &ParsedReceipt,
    ) -> Result<EligibilityReason, EligibilityError> {
        // Only the first purchase is considered.
        let Some(purchase) = receipt.first_purchase() else {
            let user = self.user_repository.find_by_username(username).await?;
            return Ok(match user {
                Some(user) if user.has_bound_subscription() => {
                    EligibilityReason::ProvidedUsernameAlreadyLinkedToAnotherAppReceipt
                }
                _ => EligibilityReason::NoPurchaseInAppReceipt,
            });
        };

        let linked_user = self
            .user_repository
            .find_by_subscription_transaction_id(&purchase.original_transaction_id)
            .await?;
        Ok(match linked_user {
            // Nobody holds this purchase (the account it was bound to was
            // probably deleted), so it can be reattached unless the requester
            // already holds another one.
            None => match self.user_repository.find_by_username(username).await? {
                Some(user) if user.has_bound_subscription() => {
                    EligibilityReason::ProvidedUsernameAlreadyLinkedToAnotherAppReceipt
                }
                _ => EligibilityReason::NoUserLinkedToAppReceipt,
            },
            Some(user) if user.username == username => {
                EligibilityReason::AppReceiptLinkedToThisUser
            }
            Some(_) => EligibilityReason::AppReceiptLinkedToAnotherUser,
        })
    }
}

/// Decider wired to the App Store and the file-backed user store.
pub type DefaultEligibilityDecider =
    EligibilityDecider<Box<dyn ReceiptRepository>, Box<dyn UserRepository>>;

impl EligibilityDecider<Box<dyn ReceiptRepository>, Box<dyn UserRepository>> {
    pub async fn new(config: &AppConfig) -> Result<Self, EligibilityError> {
        let receipt_repository = ReceiptRepositoryImpl::new(
            &config.app_store.production_url,
            &config.app_store.sandbox_url,
            config.app_store.shared_secret.clone(),
            config.app_store.exclude_old_transactions,
            Duration::from_secs(config.app_store.request_timeout_secs),
        )?;
        let user_repository = UserRepositoryImpl::new(&config.user_store.path).await?;
        Ok(Self::with_repositories(
            Box::new(receipt_repository),
            Box::new(user_repository),
        ))
    }
}
