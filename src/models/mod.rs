pub mod api_key;
pub mod gateway;
pub mod purchase_record;
pub mod purchase_status;
pub mod receipt;
pub mod withdrawal;

pub use api_key::ApiKey;
pub use gateway::Gateway;
pub use purchase_record::{ActivityItem, PurchasePage, PurchaseRecord};
pub use purchase_status::{BadgeTone, PurchaseStatus};
pub use receipt::{Balance, BulkReceipt, PurchaseReceipt};
pub use withdrawal::Withdrawal;
pub mod app_state;
pub use app_state::AppState;
