//! View model for the multi-network storefront
//!
//! Decides which network tabs exist, which one is active and which product
//! cards are shown for it. Rendering lives in `handlers` and `output`.

use serde::{Deserialize, Serialize};

use crate::catalog::{group_by_network, sort_by_capacity, Product};
use crate::network::Network;
use crate::utils::{format_capacity, format_cedis};

/// A tenant storefront and the subset of the catalog it sells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStore {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl AgentStore {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.slug
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkTab {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub network: String,
    pub capacity: f64,
    pub capacity_label: String,
    pub price_label: String,
    pub available: bool,
}

impl From<&Product> for ProductCard {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            network: p.network.clone(),
            capacity: p.capacity,
            capacity_label: format_capacity(p.capacity),
            price_label: format_cedis(p.price),
            available: p.in_stock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreView {
    pub tabs: Vec<NetworkTab>,
    pub selected: Option<String>,
    pub cards: Vec<ProductCard>,
}

fn tab_label(key: &str) -> String {
    Network::from_key(key)
        .map(|n| n.label().to_string())
        .unwrap_or_else(|| key.to_string())
}

impl StoreView {
    /// Known networks come first in their display order, unknown catalog
    /// keys follow alphabetically. The requested network wins if present,
    /// otherwise the first tab is active.
    pub fn build(products: &[Product], requested_network: Option<&str>) -> Self {
        let mut groups = group_by_network(products);
        sort_by_capacity(&mut groups);

        let mut keys: Vec<&String> = groups.keys().collect();
        keys.sort_by_key(|k| {
            let rank = Network::from_key(k).map(|n| n.rank()).unwrap_or(usize::MAX);
            (rank, (*k).clone())
        });

        let selected = requested_network
            .map(str::trim)
            .and_then(|req| keys.iter().find(|k| k.eq_ignore_ascii_case(req)))
            .or_else(|| keys.first())
            .map(|k| (*k).clone());

        let tabs = keys
            .iter()
            .map(|k| NetworkTab {
                key: (*k).clone(),
                label: tab_label(k),
                count: groups[*k].len(),
                active: selected.as_deref() == Some(k.as_str()),
            })
            .collect();

        let cards = selected
            .as_ref()
            .and_then(|k| groups.get(k))
            .map(|bucket| bucket.iter().map(ProductCard::from).collect())
            .unwrap_or_default();

        Self { tabs, selected, cards }
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
