use askama::Template;

use crate::store::{NetworkTab, ProductCard};

#[derive(Template)]
#[template(path = "store.html")]
pub struct StorePageTemplate<'a> {
    pub api_hostname: String,
    pub store_name: String,
    pub slug: String,
    pub tabs: &'a [NetworkTab],
    pub cards: &'a [ProductCard],
    pub selected_network: String,
    pub has_products: bool,
    pub has_banner: bool,
    pub banner_is_error: bool,
    pub banner_text: String,
    pub phone_value: String,
}
