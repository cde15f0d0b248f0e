use serde::{Deserialize, Serialize};

/// Why a receipt is, or is not, available to the requesting username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EligibilityReason {
    /// The receipt has no in-app purchase yet (new user and new Apple ID).
    NoPurchaseInAppReceipt,
    /// The receipt has a purchase, but no account is bound to it. The account
    /// it was bound to has most likely been deleted.
    NoUserLinkedToAppReceipt,
    /// The receipt's purchase is bound to the requesting account.
    AppReceiptLinkedToThisUser,
    /// The requesting account is already bound to a different purchase.
    ProvidedUsernameAlreadyLinkedToAnotherAppReceipt,
    /// The receipt's purchase is bound to a different account.
    AppReceiptLinkedToAnotherUser,
}

impl EligibilityReason {
    pub fn is_available(&self) -> bool {
        match self {
            Self::NoPurchaseInAppReceipt
            | Self::NoUserLinkedToAppReceipt
            | Self::AppReceiptLinkedToThisUser => true,
            Self::ProvidedUsernameAlreadyLinkedToAnotherAppReceipt
            | Self::AppReceiptLinkedToAnotherUser => false,
        }
    }

    /// Human-readable form, used in logs.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoPurchaseInAppReceipt => "No purchase in app receipt.",
            Self::NoUserLinkedToAppReceipt => "No user linked to this app receipt.",
            Self::AppReceiptLinkedToThisUser => "App receipt linked to this user.",
            Self::ProvidedUsernameAlreadyLinkedToAnotherAppReceipt => {
                "Provided username already linked to another app receipt."
            }
            Self::AppReceiptLinkedToAnotherUser => "App receipt linked to another user.",
        }
    }
}

/// Outcome of an eligibility check. `available` always agrees with the
/// reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    available: bool,
    reason: EligibilityReason,
}

impl EligibilityResult {
    pub fn available(&self) -> bool {
        self.available
    }

    pub fn reason(&self) -> EligibilityReason {
        self.reason
    }
}

impl From<EligibilityReason> for EligibilityResult {
    fn from(reason: EligibilityReason) -> Self {
        Self {
            available: reason.is_available(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_camel_case_reason() {
        let result = EligibilityResult::from(
            EligibilityReason::ProvidedUsernameAlreadyLinkedToAnotherAppReceipt,
        );
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({
                "available": false,
                "reason": "providedUsernameAlreadyLinkedToAnotherAppReceipt"
            })
        );
    }

    #[test]
    fn availability_follows_reason() {
        let available = [
            EligibilityReason::NoPurchaseInAppReceipt,
            EligibilityReason::NoUserLinkedToAppReceipt,
            EligibilityReason::AppReceiptLinkedToThisUser,
        ];
        let unavailable = [
            EligibilityReason::ProvidedUsernameAlreadyLinkedToAnotherAppReceipt,
            EligibilityReason::AppReceiptLinkedToAnotherUser,
        ];
        for reason in available {
            assert!(EligibilityResult::from(reason).available(), "{:?}", reason);
        }
        for reason in unavailable {
            assert!(!EligibilityResult::from(reason).available(), "{:?}", reason);
        }
    }

    #[test]
    fn reason_round_trips_through_wire_name() {
        let reason: EligibilityReason =
            serde_json::from_str("\"appReceiptLinkedToThisUser\"").unwrap();
        assert_eq!(reason, EligibilityReason::AppReceiptLinkedToThisUser);
    }
}
