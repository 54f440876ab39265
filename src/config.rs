use std::env;
use std::path::Path;
use std::time::Duration;

use crate::network::Network;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_NETWORK: Network = Network::Mtn;
pub const DEFAULT_ACTIVITY_POLL_SECS: u64 = 30;
pub const FALLBACK_API_BASE_URL: &str = "http://localhost:5000";

/// Everything the client needs to talk to the remote API, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub api_token: String,
    pub default_network: Network,
    pub store_slug: Option<String>,
    pub api_timeout: Option<Duration>,
    pub activity_poll_interval: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            api_base_url: get_api_base_url(),
            api_token: get_api_token(),
            default_network: get_default_network(),
            store_slug: get_store_slug(),
            api_timeout: get_api_timeout(),
            activity_poll_interval: get_activity_poll_interval(),
        }
    }

    /// Replace the configured token, e.g. from a `--token` flag.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(t) = token {
            self.api_token = t.trim().to_string();
        }
        self
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN")
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_default_network() -> Network {
    match env::var("DEFAULT_NETWORK") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "Unknown DEFAULT_NETWORK, falling back to {}", DEFAULT_NETWORK);
            DEFAULT_NETWORK
        }),
        Err(_) => DEFAULT_NETWORK,
    }
}

pub fn get_store_slug() -> Option<String> {
    env::var("STORE_SLUG")
        .ok()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// `API_TIMEOUT_SECS` unset, empty or 0 means no explicit timeout.
pub fn get_api_timeout() -> Option<Duration> {
    let raw = env::var("API_TIMEOUT_SECS").unwrap_or_default();
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

pub fn get_activity_poll_interval() -> Duration {
    let secs = env::var("ACTIVITY_POLL_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_ACTIVITY_POLL_SECS);
    Duration::from_secs(secs)
}

pub fn get_host() -> String {
    env::var("HOST")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        FALLBACK_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
