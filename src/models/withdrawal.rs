use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{lenient_f64, string_or_number};

/// A wallet withdrawal request awaiting admin review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    /// User id, or the populated user object flattened to text
    #[serde(default, deserialize_with = "string_or_number")]
    pub user: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
