pub mod store_page_template;
pub mod message_template;

pub use store_page_template::StorePageTemplate;
pub use message_template::MessageTemplate;
