use chrono::{DateTime, Utc};

/// Contents of an App Store receipt, as returned by the verifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReceipt {
    /// In-app purchases in the order the App Store listed them.
    pub in_app_purchases: Vec<Purchase>,
}

impl ParsedReceipt {
    pub fn new(in_app_purchases: Vec<Purchase>) -> Self {
        Self { in_app_purchases }
    }

    pub fn first_purchase(&self) -> Option<&Purchase> {
        self.in_app_purchases.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// The transaction ID of the original purchase.
    ///
    /// For subscriptions this stays the same across renewals, so it is the
    /// identifier a subscriber account gets bound to.
    pub original_transaction_id: String,

    /// The transaction ID of this particular purchase or renewal.
    pub transaction_id: Option<String>,
    pub product_id: Option<String>,
    pub purchase_time: Option<DateTime<Utc>>,
}

impl Purchase {
    pub fn new(original_transaction_id: impl Into<String>) -> Self {
        Self {
            original_transaction_id: original_transaction_id.into(),
            transaction_id: None,
            product_id: None,
            purchase_time: None,
        }
    }
}
