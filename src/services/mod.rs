pub mod purchase_service;
pub mod activity_service;
pub mod export_service;

pub use purchase_service::{PurchaseOutcome, PurchaseSession, FAILED_MESSAGE};
pub use activity_service::watch_activity;
pub use export_service::write_purchases_csv;
