use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{ApiKey, PurchasePage, PurchaseRecord, PurchaseStatus, Withdrawal};
use super::client::{ApiClient, ApiResponse};

/// Filter and paging for the admin purchase list (page is 1-indexed).
#[derive(Debug, Clone)]
pub struct PurchaseQuery {
    pub page: usize,
    pub per_page: usize,
    pub status: Option<PurchaseStatus>,
    pub network: Option<String>,
}

impl Default for PurchaseQuery {
    fn default() -> Self {
        Self { page: 1, per_page: 20, status: None, network: None }
    }
}

/// Load one page of purchases.
pub async fn load_purchases(client: &ApiClient, query: &PurchaseQuery) -> Result<PurchasePage, ApiError> {
    let mut params = vec![
        ("page", query.page.max(1).to_string()),
        ("limit", query.per_page.to_string()),
    ];
    if let Some(status) = &query.status {
        params.push(("status", status.as_str().to_string()));
    }
    if let Some(network) = &query.network {
        params.push(("network", network.clone()));
    }
    let mut page = client.get::<PurchasePage>("/api/admin/purchases", &params).await?.data;

    // Older backends omit paging metadata
    if page.total == 0 {
        page.total = page.purchases.len();
    }
    if page.page == 0 {
        page.page = query.page.max(1);
    }
    if page.pages == 0 {
        page.pages = if query.per_page > 0 { page.total.div_ceil(query.per_page).max(1) } else { 1 };
    }
    Ok(page)
}

/// Load every page of purchases matching the query.
pub async fn load_all_purchases(client: &ApiClient, query: &PurchaseQuery) -> Result<Vec<PurchaseRecord>, ApiError> {
    let mut q = query.clone();
    q.page = 1;
    let mut out = Vec::new();
    loop {
        let page = load_purchases(client, &q).await?;
        let fetched = page.purchases.len();
        out.extend(page.purchases);
        if fetched == 0 || q.page >= page.pages {
            break;
        }
        q.page += 1;
    }
    Ok(out)
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a PurchaseStatus,
}

pub async fn update_purchase_status(
    client: &ApiClient,
    purchase_id: &str,
    status: &PurchaseStatus,
) -> Result<ApiResponse<Value>, ApiError> {
    let endpoint = format!("/api/admin/purchases/{}/status", purchase_id);
    client.put(&endpoint, &StatusUpdate { status }).await
}

pub async fn load_api_keys(client: &ApiClient) -> Result<Vec<ApiKey>, ApiError> {
    Ok(client.get::<Vec<ApiKey>>("/api/admin/api-keys", &[]).await?.data)
}

/// Create a key. The returned record carries the full key exactly once.
pub async fn create_api_key(client: &ApiClient, name: &str) -> Result<ApiKey, ApiError> {
    let body = serde_json::json!({ "name": name.trim() });
    Ok(client.post::<ApiKey, _>("/api/admin/api-keys", &body).await?.data)
}

pub async fn revoke_api_key(client: &ApiClient, key_id: &str) -> Result<ApiResponse<Value>, ApiError> {
    client.delete(&format!("/api/admin/api-keys/{}", key_id)).await
}

pub async fn load_withdrawals(client: &ApiClient, status: Option<&str>) -> Result<Vec<Withdrawal>, ApiError> {
    let params: Vec<(&str, String)> = status.map(|s| vec![("status", s.to_string())]).unwrap_or_default();
    Ok(client.get::<Vec<Withdrawal>>("/api/admin/withdrawals", &params).await?.data)
}

pub async fn approve_withdrawal(client: &ApiClient, withdrawal_id: &str) -> Result<ApiResponse<Value>, ApiError> {
    let endpoint = format!("/api/admin/withdrawals/{}/approve", withdrawal_id);
    client.post(&endpoint, &serde_json::json!({})).await
}

pub async fn reject_withdrawal(
    client: &ApiClient,
    withdrawal_id: &str,
    reason: Option<&str>,
) -> Result<ApiResponse<Value>, ApiError> {
    let endpoint = format!("/api/admin/withdrawals/{}/reject", withdrawal_id);
    let body = match reason {
        Some(r) => serde_json::json!({ "reason": r }),
        None => serde_json::json!({}),
    };
    client.post(&endpoint, &body).await
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreditRequest<'a> {
    user_id: &'a str,
    amount: f64,
    description: &'a str,
}

/// Credit a user's wallet.
pub async fn credit_wallet(
    client: &ApiClient,
    user_id: &str,
    amount: f64,
    description: &str,
) -> Result<ApiResponse<Value>, ApiError> {
    let body = CreditRequest { user_id, amount, description };
    client.post("/api/admin/wallet/credit", &body).await
}
