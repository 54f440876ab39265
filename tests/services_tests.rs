mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use cletech::models::{PurchaseRecord, PurchaseStatus};
use cletech::services::export_service::EXPORT_HEADER;
use cletech::services::{watch_activity, write_purchases_csv};

use common::{client_for, spawn_stub};

#[tokio::test]
async fn test_watch_activity_stops_after_max_polls() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/api/purchase/history",
        get(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({"success": true, "data": [
                    {"_id": format!("a{n}"), "phoneNumber": "0241234567", "network": "MTN", "capacity": 1, "status": "pending"}
                ]}))
            }
        }),
    );
    let base = spawn_stub(router).await;
    let client = client_for(&base);

    let mut seen = Vec::new();
    watch_activity(&client, Duration::from_millis(10), 5, Some(3), |items| {
        seen.extend(items.iter().map(|i| i.id.clone()));
    })
    .await;

    assert_eq!(seen, vec!["a0", "a1", "a2"]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_watch_activity_skips_failed_polls() {
    let base = common::dead_base_url().await;
    let client = client_for(&base);
    let mut batches = 0;
    watch_activity(&client, Duration::from_millis(5), 5, Some(2), |_| batches += 1).await;
    assert_eq!(batches, 0);
}

#[test]
fn test_export_purchases_csv() {
    let rows: Vec<PurchaseRecord> = serde_json::from_value(json!([
        {"_id": "1", "reference": "R1", "phoneNumber": "0241234567", "network": "MTN",
         "capacity": 1.5, "price": 6, "status": "success", "createdAt": "2024-03-01T10:00:00Z"},
        {"id": 2, "phoneNumber": "0201234567", "network": "TELECEL", "capacity": 10, "price": "38.5"}
    ]))
    .unwrap();
    assert_eq!(rows[0].status, PurchaseStatus::Completed);

    let mut out = Vec::new();
    let written = write_purchases_csv(&rows, &mut out).unwrap();
    assert_eq!(written, 2);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], EXPORT_HEADER.join(","));
    assert_eq!(lines[1], "1,R1,0241234567,MTN,1.5,6.00,completed,2024-03-01T10:00:00+00:00");
    assert_eq!(lines[2], "2,,0201234567,TELECEL,10,38.50,,");
}
