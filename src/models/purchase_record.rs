use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PurchaseStatus;
use crate::utils::{lenient_f64, string_or_number};

/// A purchase as listed in the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub network: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub capacity: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub status: PurchaseStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of admin purchases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePage {
    #[serde(default)]
    pub purchases: Vec<PurchaseRecord>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub pages: usize,
}

/// An entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(default, alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub network: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub capacity: f64,
    #[serde(default)]
    pub status: PurchaseStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
