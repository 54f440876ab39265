use crate::error::ApiError;
use crate::models::Balance;
use super::client::ApiClient;

/// Current wallet balance, always read from the server.
pub async fn load_balance(client: &ApiClient) -> Result<f64, ApiError> {
    let resp = client.get::<Balance>("/api/wallet/balance", &[]).await?;
    Ok(resp.data.balance)
}
