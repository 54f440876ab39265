use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::bulk::{is_valid_capacity, BulkParse, ParseError, PurchaseIntent};
use crate::error::{ApiError, ValidationError};
use crate::models::{ActivityItem, BulkReceipt, Gateway, PurchaseReceipt};
use crate::network::Network;
use crate::phone::{normalize_phone, validate_phone};
use crate::utils::lenient_f64;
use super::client::{ApiClient, ApiResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest<'a> {
    pub phone_number: &'a str,
    pub network: Network,
    pub capacity: f64,
    pub gateway: Gateway,
}

#[derive(Debug, Serialize)]
pub struct BulkRequest<'a> {
    pub purchases: &'a [PurchaseIntent],
    pub network: Network,
    pub gateway: Gateway,
}

/// Buy a single bundle.
pub async fn buy(
    client: &ApiClient,
    intent: &PurchaseIntent,
    gateway: Gateway,
) -> Result<ApiResponse<PurchaseReceipt>, ApiError> {
    let body = BuyRequest {
        phone_number: &intent.phone_number,
        network: intent.network,
        capacity: intent.capacity,
        gateway,
    };
    client.post("/api/purchase/buy", &body).await
}

/// Buy a batch of bundles in one request.
pub async fn buy_bulk(
    client: &ApiClient,
    purchases: &[PurchaseIntent],
    network: Network,
    gateway: Gateway,
) -> Result<ApiResponse<BulkReceipt>, ApiError> {
    let body = BulkRequest { purchases, network, gateway };
    client.post("/api/purchase/bulk", &body).await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParsedRow {
    /// Spreadsheet line, when the server reports one
    #[serde(default, alias = "row")]
    line: Option<usize>,
    phone_number: String,
    #[serde(deserialize_with = "lenient_f64")]
    capacity: f64,
}

#[derive(Debug, Deserialize)]
struct ParsedSheet {
    #[serde(default)]
    purchases: Vec<ParsedRow>,
    #[serde(default)]
    errors: Vec<ParseError>,
}

impl ParsedSheet {
    /// Rows the server accepted are checked again before they can be submitted.
    ///
    /// A rejected row keeps the line the server gave it. Without one it is
    /// reported on line 0 and named by its position among accepted rows, so
    /// it never collides with the server's own line numbers.
    fn into_bulk_parse(self, network: Network) -> BulkParse {
        let mut out = BulkParse { purchases: Vec::new(), errors: self.errors };
        for (idx, row) in self.purchases.into_iter().enumerate() {
            let phone_number = normalize_phone(&row.phone_number);
            let invalid = if !validate_phone(&phone_number) {
                Some(ValidationError::InvalidPhone(row.phone_number.clone()))
            } else if !is_valid_capacity(row.capacity) {
                Some(ValidationError::InvalidCapacity(row.capacity.to_string()))
            } else {
                None
            };
            match (invalid, row.line) {
                (None, _) => out.purchases.push(PurchaseIntent { phone_number, capacity: row.capacity, network }),
                (Some(e), Some(line)) => out.errors.push(ParseError { line, error: e.to_string() }),
                (Some(e), None) => out.errors.push(ParseError {
                    line: 0,
                    error: format!("{} (accepted row {})", e, idx + 1),
                }),
            }
        }
        out
    }
}

/// Have the server parse a spreadsheet (xlsx/xls/csv) into purchases.
pub async fn parse_spreadsheet(
    client: &ApiClient,
    file_name: &str,
    bytes: Vec<u8>,
    network: Network,
) -> Result<BulkParse, ApiError> {
    let describe = format!("file=@{}", file_name);
    let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
    let resp = client
        .post_multipart::<ParsedSheet>("/api/purchase/parse-excel", form, &describe)
        .await?;
    Ok(resp.data.into_bulk_parse(network))
}

/// Most recent purchases of the current user.
pub async fn recent_activity(client: &ApiClient, limit: usize) -> Result<Vec<ActivityItem>, ApiError> {
    let resp = client
        .get::<Vec<ActivityItem>>("/api/purchase/history", &[("limit", limit.to_string())])
        .await?;
    Ok(resp.data)
}
