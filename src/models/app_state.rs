use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::utils::hostname_from_url;

/// Shared state of the storefront server.
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(client: ApiClient, settings: Settings) -> Self {
        Self { client, settings: Arc::new(settings) }
    }

    pub fn api_hostname(&self) -> String {
        hostname_from_url(self.client.base_url())
    }
}
