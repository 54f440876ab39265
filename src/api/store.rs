use serde::Serialize;

use crate::error::{ApiError, ValidationError};
use crate::models::PurchaseReceipt;
use crate::network::Network;
use crate::store::AgentStore;
use super::client::{ApiClient, ApiResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StorePurchaseRequest<'a> {
    phone_number: &'a str,
    network: Network,
    capacity: f64,
}

/// Slugs go into the request path as-is, so only `[a-z0-9-]` is accepted.
fn store_path(slug: &str) -> Result<String, ValidationError> {
    let slug = slug.trim().to_lowercase();
    let valid = !slug.is_empty() && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(ValidationError::InvalidSlug(slug));
    }
    Ok(format!("/api/store/{}", slug))
}

/// Load a tenant storefront by slug.
pub async fn load_agent_store(client: &ApiClient, slug: &str) -> Result<AgentStore, ApiError> {
    let resp = client.get::<AgentStore>(&store_path(slug)?, &[]).await?;
    Ok(resp.data)
}

/// Start an end-customer purchase on a storefront.
pub async fn store_purchase(
    client: &ApiClient,
    slug: &str,
    phone_number: &str,
    network: Network,
    capacity: f64,
) -> Result<ApiResponse<PurchaseReceipt>, ApiError> {
    let body = StorePurchaseRequest { phone_number, network, capacity };
    client.post(&format!("{}/purchase", store_path(slug)?), &body).await
}
