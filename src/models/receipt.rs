use serde::Deserialize;

use crate::utils::lenient_opt_f64;

/// `data` of a successful single purchase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub new_balance: Option<f64>,
    /// Set when the payment continues on a gateway checkout page.
    #[serde(default)]
    pub authorization_url: Option<String>,
}

/// `data` of a successful bulk purchase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReceipt {
    #[serde(default)]
    pub successful: usize,
    #[serde(default)]
    pub failed: usize,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub new_balance: Option<f64>,
    #[serde(default)]
    pub authorization_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Balance {
    #[serde(default, deserialize_with = "crate::utils::lenient_f64")]
    pub balance: f64,
}
