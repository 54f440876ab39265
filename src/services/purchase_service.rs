use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::{self, ApiClient};
use crate::bulk::{check_submission, PurchaseIntent, SubmissionBlocked};
use crate::error::ApiError;
use crate::models::{BulkReceipt, Gateway};
use crate::network::Network;

pub const FAILED_MESSAGE: &str = "Purchase failed. Please try again.";
const SUCCESS_MESSAGE: &str = "Purchase successful";

/// Result of one purchase attempt, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    Success {
        message: String,
        /// Balance re-read from the server after a wallet payment
        balance: Option<f64>,
        /// Gateway checkout page, when payment continues elsewhere
        checkout_url: Option<String>,
    },
    /// The server refused the purchase; its message is shown verbatim.
    Rejected { message: String },
    /// Transport or decoding failure.
    Failed { message: String },
    /// Another purchase from this session is still in flight.
    Busy,
    /// Refused locally before any request was made.
    Blocked(SubmissionBlocked),
}

impl PurchaseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PurchaseOutcome::Success { .. })
    }

    pub fn message(&self) -> String {
        match self {
            PurchaseOutcome::Success { message, .. }
            | PurchaseOutcome::Rejected { message }
            | PurchaseOutcome::Failed { message } => message.clone(),
            PurchaseOutcome::Busy => "A purchase is already in progress.".to_string(),
            PurchaseOutcome::Blocked(reason) => reason.to_string(),
        }
    }
}

/// Clears the in-flight flag when the request finishes, however it finishes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Submits purchases one request at a time.
///
/// Each call issues at most one POST. Nothing is retried and the local
/// balance is never adjusted by hand: after a wallet payment it is read
/// back from the server.
pub struct PurchaseSession {
    client: ApiClient,
    in_flight: AtomicBool,
}

impl PurchaseSession {
    pub fn new(client: ApiClient) -> Self {
        Self { client, in_flight: AtomicBool::new(false) }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit_single(&self, intent: &PurchaseIntent, gateway: Gateway) -> PurchaseOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return PurchaseOutcome::Busy;
        };
        tracing::info!(phone = %intent.phone_number, network = %intent.network, capacity = intent.capacity, %gateway, "Submitting purchase");
        match api::buy(&self.client, intent, gateway).await {
            Ok(resp) => {
                let balance = self.refresh_balance(gateway).await;
                PurchaseOutcome::Success {
                    message: resp.message.unwrap_or_else(|| SUCCESS_MESSAGE.to_string()),
                    balance,
                    checkout_url: resp.data.authorization_url,
                }
            }
            Err(e) => classify_failure(e),
        }
    }

    /// Submit a parsed batch. `total` is the locally quoted cost and
    /// `balance` the last known wallet balance, used only for the local guard.
    pub async fn submit_bulk(
        &self,
        purchases: &[PurchaseIntent],
        network: Network,
        gateway: Gateway,
        total: f64,
        balance: Option<f64>,
    ) -> PurchaseOutcome {
        let balance_for_guard = if gateway.debits_wallet() { balance } else { None };
        if let Err(reason) = check_submission(purchases, total, balance_for_guard) {
            tracing::info!(%reason, "Bulk purchase blocked locally");
            return PurchaseOutcome::Blocked(reason);
        }
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return PurchaseOutcome::Busy;
        };
        tracing::info!(count = purchases.len(), %network, %gateway, total, "Submitting bulk purchase");
        match api::buy_bulk(&self.client, purchases, network, gateway).await {
            Ok(resp) => {
                let balance = self.refresh_balance(gateway).await;
                let message = bulk_message(resp.message, &resp.data);
                PurchaseOutcome::Success { message, balance, checkout_url: resp.data.authorization_url }
            }
            Err(e) => classify_failure(e),
        }
    }

    async fn refresh_balance(&self, gateway: Gateway) -> Option<f64> {
        if !gateway.debits_wallet() {
            return None;
        }
        match api::load_balance(&self.client).await {
            Ok(b) => Some(b),
            Err(e) => {
                tracing::warn!(error = %e, "Could not refresh wallet balance after purchase");
                None
            }
        }
    }
}

/// Counts come from the receipt as reported; a partial failure is always spelled out.
fn bulk_message(server_message: Option<String>, receipt: &BulkReceipt) -> String {
    if receipt.failed > 0 {
        let counts = format!("{} succeeded, {} failed", receipt.successful, receipt.failed);
        return match server_message {
            Some(m) => format!("{} ({})", m, counts),
            None => counts,
        };
    }
    match server_message {
        Some(m) => m,
        None if receipt.successful > 0 => format!("{} purchases submitted", receipt.successful),
        None => "Bulk purchase submitted".to_string(),
    }
}

fn classify_failure(e: ApiError) -> PurchaseOutcome {
    match e {
        ApiError::Server { message, .. } => PurchaseOutcome::Rejected { message },
        other => {
            tracing::error!(error = %other, "Purchase request failed");
            PurchaseOutcome::Failed { message: FAILED_MESSAGE.to_string() }
        }
    }
}
