//! Product catalog and grouping by network

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::{lenient_f64, string_or_number};

const CAPACITY_EPSILON: f64 = 1e-9;

fn default_in_stock() -> bool {
    true
}

/// A data bundle offered for sale. Read-only; owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    pub network: String,
    /// Size in GB
    #[serde(deserialize_with = "lenient_f64")]
    pub capacity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

impl Product {
    pub fn matches(&self, network: &str, capacity: f64) -> bool {
        self.network.eq_ignore_ascii_case(network) && (self.capacity - capacity).abs() < CAPACITY_EPSILON
    }
}

/// Products keyed by network.
pub type GroupedProducts = BTreeMap<String, Vec<Product>>;

/// The full catalog as loaded for one session.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
    pub grouped: GroupedProducts,
}

impl ProductCatalog {
    /// Build from a flat product list; groups are sorted by capacity.
    pub fn new(products: Vec<Product>) -> Self {
        let mut grouped = group_by_network(&products);
        sort_by_capacity(&mut grouped);
        Self { products, grouped }
    }

    pub fn find(&self, network: &str, capacity: f64) -> Option<&Product> {
        find_product(&self.products, network, capacity)
    }

    pub fn networks(&self) -> Vec<&str> {
        self.grouped.keys().map(|k| k.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Bucket products by `network`, keeping input order inside each bucket.
pub fn group_by_network(products: &[Product]) -> GroupedProducts {
    let mut groups: GroupedProducts = BTreeMap::new();
    for product in products {
        groups
            .entry(product.network.clone())
            .or_default()
            .push(product.clone());
    }
    groups
}

/// Sort every bucket by ascending capacity. Stable for equal capacities.
pub fn sort_by_capacity(groups: &mut GroupedProducts) {
    for bucket in groups.values_mut() {
        bucket.sort_by(|a, b| a.capacity.total_cmp(&b.capacity));
    }
}

/// First product for `network` (case-insensitive) with exactly `capacity` GB.
pub fn find_product<'a>(products: &'a [Product], network: &str, capacity: f64) -> Option<&'a Product> {
    products.iter().find(|p| p.matches(network, capacity))
}
