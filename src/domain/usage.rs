use serde::{Deserialize, Serialize};

/// One logged instance of an activity being performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Unique per record
    pub id: String,
    pub activity_id: String,
    /// Epoch milliseconds
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etablissement_id: Option<String>,
}

impl UsageRecord {
    /// New record with a fresh UUID
    pub fn new(activity_id: impl Into<String>, date: i64, etablissement_id: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            activity_id: activity_id.into(),
            date,
            etablissement_id,
        }
    }
}
