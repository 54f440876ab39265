use serde::Deserialize;

use crate::catalog::{Product, ProductCatalog};
use crate::error::ApiError;
use super::client::ApiClient;

#[derive(Deserialize)]
struct ProductsData {
    #[serde(default)]
    products: Vec<Product>,
}

/// Load the product catalog.
/// The server also sends a `grouped` map; it is rebuilt locally instead.
pub async fn load_products(client: &ApiClient) -> Result<ProductCatalog, ApiError> {
    let resp = client.get::<ProductsData>("/api/purchase/products", &[]).await?;
    tracing::debug!(count = resp.data.products.len(), "Loaded product catalog");
    Ok(ProductCatalog::new(resp.data.products))
}
