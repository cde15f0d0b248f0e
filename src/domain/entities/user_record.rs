#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub subscription: Subscription,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscription {
    /// Original transaction ID of the App Store purchase this account is
    /// bound to, if any.
    pub transaction_id: Option<String>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            subscription: Subscription::default(),
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.subscription.transaction_id = Some(transaction_id.into());
        self
    }

    /// An empty transaction ID counts as unbound.
    pub fn bound_transaction_id(&self) -> Option<&str> {
        self.subscription
            .transaction_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    pub fn has_bound_subscription(&self) -> bool {
        self.bound_transaction_id().is_some()
    }
}
