pub mod helpers;
pub mod store;
pub mod system;

pub use store::{store_buy_post, store_get};
pub use system::{health_get, root_get};
