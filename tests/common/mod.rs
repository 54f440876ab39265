#![allow(dead_code)]

use axum::Router;
use cletech::api::ApiClient;

pub const TEST_TOKEN: &str = "test-token-1234";

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn client_for(base_url: &str) -> ApiClient {
    cletech::api::set_silent(true);
    ApiClient::with_http(reqwest::Client::new(), base_url, TEST_TOKEN)
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn catalog_json() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            "products": [
                {"_id": "p1", "network": "MTN", "capacity": 5, "price": 20, "inStock": true},
                {"_id": "p2", "network": "AT", "capacity": 2, "price": "9.50"},
                {"_id": "p3", "network": "MTN", "capacity": 1, "price": 4.5, "inStock": false},
                {"id": 4, "network": "TELECEL", "capacity": 10, "price": 38}
            ],
            "grouped": {}
        }
    })
}
