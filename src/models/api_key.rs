use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::string_or_number;

/// An API key issued to a reseller. `key` is only present right after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl ApiKey {
    /// What to show for the key in listings.
    pub fn display_key(&self) -> String {
        match (&self.key, &self.prefix) {
            (Some(k), _) => k.clone(),
            (None, Some(p)) => format!("{}…", p),
            (None, None) => "—".to_string(),
        }
    }
}
