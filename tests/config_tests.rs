use cletech::config;
use cletech::Network;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;
use std::time::Duration;

// Tests in this file mutate process-wide environment variables
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("https://api.cletech.shop/"),
        "https://api.cletech.shop"
    );
}

#[test]
fn test_sanitize_base_url_no_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("https://api.cletech.shop"),
        "https://api.cletech.shop"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("https://cletech-server.onrender.com///"),
        "https://cletech-server.onrender.com"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  https://api.cletech.shop/  "),
        "https://api.cletech.shop"
    );
}

#[test]
fn test_sanitize_base_url_empty_string() {
    assert_eq!(config::sanitize_base_url(""), "http://localhost:5000");
}

#[test]
fn test_sanitize_base_url_whitespace_only() {
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:5000");
}

#[test]
fn test_get_api_base_url_with_trailing_slash() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("API_BASE_URL", "https://api.cletech.shop/");

    assert_eq!(config::get_api_base_url(), "https://api.cletech.shop");

    env::remove_var("API_BASE_URL");
}

#[test]
fn test_get_api_base_url_uses_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var("API_BASE_URL");

    // DEFAULT_API_BASE_URL is empty, so sanitize_base_url returns localhost fallback
    assert_eq!(config::get_api_base_url(), "http://localhost:5000");
}

#[test]
fn test_default_network_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("DEFAULT_NETWORK", "telecel");
    assert_eq!(config::get_default_network(), Network::Telecel);

    env::set_var("DEFAULT_NETWORK", "not-a-network");
    assert_eq!(config::get_default_network(), config::DEFAULT_NETWORK);

    env::remove_var("DEFAULT_NETWORK");
    assert_eq!(config::get_default_network(), Network::Mtn);
}

#[test]
fn test_api_timeout_zero_means_none() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("API_TIMEOUT_SECS", "0");
    assert_eq!(config::get_api_timeout(), None);

    env::set_var("API_TIMEOUT_SECS", "15");
    assert_eq!(config::get_api_timeout(), Some(Duration::from_secs(15)));

    env::remove_var("API_TIMEOUT_SECS");
    assert_eq!(config::get_api_timeout(), None);
}

#[test]
fn test_activity_poll_interval_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::remove_var("ACTIVITY_POLL_SECS");
    assert_eq!(config::get_activity_poll_interval(), Duration::from_secs(30));
}

#[test]
fn test_store_slug_is_normalized() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("STORE_SLUG", "  KofiData ");
    assert_eq!(config::get_store_slug(), Some("kofidata".to_string()));

    env::set_var("STORE_SLUG", "   ");
    assert_eq!(config::get_store_slug(), None);

    env::remove_var("STORE_SLUG");
}

#[test]
fn test_settings_token_override() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    env::set_var("API_TOKEN", "from-env");
    let settings = config::Settings::from_env();
    assert_eq!(settings.api_token, "from-env");

    let settings = settings.with_token(Some(" from-flag ".to_string()));
    assert_eq!(settings.api_token, "from-flag");

    let settings = settings.with_token(None);
    assert_eq!(settings.api_token, "from-flag");
    env::remove_var("API_TOKEN");
}
