// Remote API modules
pub mod client;
pub mod products;
pub mod purchase;
pub mod wallet;
pub mod admin;
pub mod store;

// Re-export commonly used functions
pub use client::{set_silent, ApiClient, ApiResponse};
pub use products::load_products;
pub use purchase::{buy, buy_bulk, parse_spreadsheet, recent_activity};
pub use wallet::load_balance;
pub use admin::PurchaseQuery;
pub use store::{load_agent_store, store_purchase};
