mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use cletech::api::{admin, PurchaseQuery};
use cletech::models::PurchaseStatus;

use common::{client_for, spawn_stub};

async fn purchases(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let page: usize = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let status = q.get("status").cloned().unwrap_or_default();
    let rows: Vec<Value> = (0..2)
        .map(|i| json!({"_id": format!("p{page}-{i}"), "status": status, "capacity": 1, "price": 4}))
        .collect();
    Json(json!({"success": true, "data": {"purchases": rows, "total": 5, "page": page, "pages": 3}}))
}

#[tokio::test]
async fn test_load_purchases_sends_filters() {
    let base = spawn_stub(Router::new().route("/api/admin/purchases", get(purchases))).await;
    let query = PurchaseQuery { page: 2, status: Some(PurchaseStatus::Failed), ..PurchaseQuery::default() };
    let page = admin::load_purchases(&client_for(&base), &query).await.unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.pages, 3);
    assert_eq!(page.purchases[0].id, "p2-0");
    assert_eq!(page.purchases[0].status, PurchaseStatus::Failed);
}

#[tokio::test]
async fn test_load_purchases_fills_missing_paging() {
    let router = Router::new().route(
        "/api/admin/purchases",
        get(|| async { Json(json!({"success": true, "data": {"purchases": [{"_id": "a"}, {"_id": "b"}, {"_id": "c"}]}})) }),
    );
    let base = spawn_stub(router).await;
    let query = PurchaseQuery { per_page: 2, ..PurchaseQuery::default() };
    let page = admin::load_purchases(&client_for(&base), &query).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.pages, 2);
}

#[tokio::test]
async fn test_load_all_purchases_walks_pages() {
    let base = spawn_stub(Router::new().route("/api/admin/purchases", get(purchases))).await;
    let rows = admin::load_all_purchases(&client_for(&base), &PurchaseQuery::default()).await.unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p1-0", "p1-1", "p2-0", "p2-1", "p3-0", "p3-1"]);
}

#[tokio::test]
async fn test_update_status_and_credit_bodies() {
    let seen: Arc<Mutex<Vec<(String, Value)>>> = Arc::default();
    let (s1, s2) = (seen.clone(), seen.clone());
    let router = Router::new()
        .route(
            "/api/admin/purchases/:id/status",
            put(move |Path(id): Path<String>, Json(body): Json<Value>| {
                let seen = s1.clone();
                async move {
                    seen.lock().unwrap().push((id, body));
                    Json(json!({"success": true, "message": "Status updated"}))
                }
            }),
        )
        .route(
            "/api/admin/wallet/credit",
            post(move |Json(body): Json<Value>| {
                let seen = s2.clone();
                async move {
                    seen.lock().unwrap().push(("credit".into(), body));
                    Json(json!({"success": true, "data": {"balance": 50}}))
                }
            }),
        );
    let base = spawn_stub(router).await;
    let client = client_for(&base);

    let resp = admin::update_purchase_status(&client, "abc", &PurchaseStatus::Refunded).await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Status updated"));
    admin::credit_wallet(&client, "u1", 25.0, "Top up").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], ("abc".to_string(), json!({"status": "refunded"})));
    assert_eq!(seen[1].1, json!({"userId": "u1", "amount": 25.0, "description": "Top up"}));
}

#[tokio::test]
async fn test_api_key_lifecycle() {
    let router = Router::new()
        .route(
            "/api/admin/api-keys",
            get(|| async {
                Json(json!({"success": true, "data": [
                    {"_id": "k1", "name": "shop", "prefix": "ck_live", "isActive": true},
                    {"_id": "k2", "name": "old", "isActive": false}
                ]}))
            })
            .post(|Json(body): Json<Value>| async move {
                Json(json!({"success": true, "data": {"_id": "k3", "name": body["name"], "key": "ck_live_secret"}}))
            }),
        )
        .route(
            "/api/admin/api-keys/:id",
            delete(|| async { Json(json!({"success": true, "message": "Revoked"})) }),
        );
    let base = spawn_stub(router).await;
    let client = client_for(&base);

    let keys = admin::load_api_keys(&client).await.unwrap();
    assert_eq!(keys[0].display_key(), "ck_live…");
    assert!(!keys[1].is_active);

    let created = admin::create_api_key(&client, "  new shop ").await.unwrap();
    assert_eq!(created.name, "new shop");
    assert_eq!(created.display_key(), "ck_live_secret");

    let resp = admin::revoke_api_key(&client, "k3").await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Revoked"));
}

#[tokio::test]
async fn test_withdrawal_review() {
    let router = Router::new()
        .route(
            "/api/admin/withdrawals",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let status = q.get("status").cloned().unwrap_or_else(|| "any".into());
                Json(json!({"success": true, "data": [
                    {"_id": "w1", "user": 17, "amount": "120.00", "method": "momo", "status": status}
                ]}))
            }),
        )
        .route(
            "/api/admin/withdrawals/:id/reject",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"success": true, "message": format!("Rejected: {}", body["reason"].as_str().unwrap_or(""))}))
            }),
        );
    let base = spawn_stub(router).await;
    let client = client_for(&base);

    let rows = admin::load_withdrawals(&client, Some("pending")).await.unwrap();
    assert_eq!(rows[0].user, "17");
    assert_eq!(rows[0].amount, 120.0);
    assert_eq!(rows[0].status, "pending");

    let resp = admin::reject_withdrawal(&client, "w1", Some("duplicate")).await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Rejected: duplicate"));
}
