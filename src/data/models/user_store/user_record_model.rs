use serde::Deserialize;

/// One subscriber record in the user store file.
///
/// The file is a JSON array of these records.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRecordModel {
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) subscription: SubscriptionModel,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriptionModel {
    pub(crate) transaction_id: Option<String>,
}
