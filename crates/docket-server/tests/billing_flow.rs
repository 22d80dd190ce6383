// SPDX-License-Identifier: Apache-2.0

mod support;

use docket_server::store::collections;
use docket_server::{MemoryStore, RecordStore};
use mongodb::bson::doc;
use serde_json::json;
use std::sync::Arc;
use support::{json, login, request, seed_client, seed_user, spawn_app};

async fn seeded_app() -> (Arc<MemoryStore>, std::net::SocketAddr, String, String) {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Admin",
        "admin@example.com",
        "Password@123",
        "ADMIN",
    )
    .await;
    let client_id = seed_client(&store, "Initech").await;
    let addr = spawn_app(store.clone()).await;
    let token = login(addr, "admin@example.com", "Password@123").await;
    (store, addr, token, client_id.to_hex())
}

#[tokio::test]
async fn invoice_creation_derives_totals_and_ignores_client_figures() {
    let (store, addr, token, client_id) = seeded_app().await;

    let (status, body) = request(
        addr,
        "POST",
        "/api/billing/invoices",
        Some(&token),
        Some(json!({
            "client": client_id,
            "items": [{"description": "Svc", "quantity": 2, "rate": 500, "total": 1}],
            "taxRate": 18,
            "subtotal": 5,
            "taxAmount": 5,
            "total": 5,
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    let invoice = json(&body);
    assert_eq!(invoice["subtotal"], json!(1000.0));
    assert_eq!(invoice["taxAmount"], json!(180.0));
    assert_eq!(invoice["total"], json!(1180.0));
    assert_eq!(invoice["items"][0]["total"], json!(1000.0));
    assert_eq!(invoice["status"], json!("DRAFT"));
    assert_eq!(invoice["currency"], json!("INR"));

    let logs = store
        .find(collections::AUDIT_LOGS, doc! {}, None)
        .await
        .expect("audit logs");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].get_str("action").unwrap(), "INVOICE_CREATED");
    assert_eq!(logs[0].get_str("entityType").unwrap(), "Invoice");
}

#[tokio::test]
async fn invoice_creation_is_role_gated() {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Vee",
        "viewer@example.com",
        "Password@123",
        "VIEWER",
    )
    .await;
    let client_id = seed_client(&store, "Initech").await.to_hex();
    let addr = spawn_app(store).await;
    let token = login(addr, "viewer@example.com", "Password@123").await;

    let (status, _) = request(
        addr,
        "POST",
        "/api/billing/invoices",
        Some(&token),
        Some(json!({
            "client": client_id,
            "items": [{"description": "Svc", "quantity": 1, "rate": 100}],
        })),
    )
    .await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn invoice_status_patch_updates_or_404s_and_audits() {
    let (store, addr, token, client_id) = seeded_app().await;

    let (_, body) = request(
        addr,
        "POST",
        "/api/billing/invoices",
        Some(&token),
        Some(json!({
            "client": client_id,
            "items": [{"description": "Svc", "quantity": 1, "rate": 100}],
        })),
    )
    .await;
    let invoice_id = json(&body)["_id"].as_str().expect("invoice id").to_string();

    let (status, body) = request(
        addr,
        "PATCH",
        &format!("/api/billing/invoices/{invoice_id}/status"),
        Some(&token),
        Some(json!({"status": "PAID"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["status"], json!("PAID"));

    let (status, body) = request(
        addr,
        "PATCH",
        "/api/billing/invoices/ffffffffffffffffffffffff/status",
        Some(&token),
        Some(json!({"status": "VOID"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(json(&body)["message"], json!("Invoice not found"));

    let logs = store
        .find(
            collections::AUDIT_LOGS,
            doc! {"action": "INVOICE_STATUS_UPDATED"},
            None,
        )
        .await
        .expect("audit logs");
    assert_eq!(logs.len(), 1);
}

#[tokio::test]
async fn time_entry_amount_is_derived_and_listing_filters_by_case() {
    let (store, addr, token, _) = seeded_app().await;
    let case_a = store
        .insert(collections::CASES, doc! {"title": "A", "status": "ACTIVE"})
        .await
        .expect("case a");
    let case_b = store
        .insert(collections::CASES, doc! {"title": "B", "status": "ACTIVE"})
        .await
        .expect("case b");

    let (status, body) = request(
        addr,
        "POST",
        "/api/billing/time-entries",
        Some(&token),
        Some(json!({
            "case": case_a.to_hex(),
            "description": "drafting",
            "rate": 500,
            "hours": 2.25,
            "totalAmount": 1,
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    assert_eq!(json(&body)["totalAmount"], json!(1125.0));

    let (status, _) = request(
        addr,
        "POST",
        "/api/billing/time-entries",
        Some(&token),
        Some(json!({
            "case": case_b.to_hex(),
            "description": "research",
            "rate": 100,
            "hours": 1,
        })),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = request(
        addr,
        "GET",
        &format!("/api/billing/time-entries?caseId={}", case_a.to_hex()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let entries = json(&body);
    let entries = entries.as_array().expect("entries array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["case"]["title"], json!("A"));
    assert_eq!(entries[0]["user"]["name"], json!("Admin"));

    let logs = store
        .find(
            collections::AUDIT_LOGS,
            doc! {"action": "TIME_ENTRY_CREATED"},
            None,
        )
        .await
        .expect("audit logs");
    assert_eq!(logs.len(), 2);
}

#[tokio::test]
async fn expenses_record_and_audit_trail_is_admin_only() {
    let (store, addr, admin_token, client_id) = seeded_app().await;
    seed_user(
        &store,
        "Asha",
        "asha@example.com",
        "Password@123",
        "ATTORNEY",
    )
    .await;
    let attorney_token = login(addr, "asha@example.com", "Password@123").await;

    let (status, body) = request(
        addr,
        "POST",
        "/api/billing/expenses",
        Some(&attorney_token),
        Some(json!({
            "client": client_id,
            "description": "court filing",
            "amount": 230.5,
            "category": "FILING",
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    let expense = json(&body);
    assert_eq!(expense["category"], json!("FILING"));
    assert_eq!(expense["status"], json!("RECORDED"));
    assert_eq!(expense["billable"], json!(true));

    let (status, _) = request(addr, "GET", "/api/billing/audit", Some(&attorney_token), None).await;
    assert_eq!(status, 403);

    let (status, body) = request(addr, "GET", "/api/billing/audit", Some(&admin_token), None).await;
    assert_eq!(status, 200);
    let logs = json(&body);
    let logs = logs.as_array().expect("audit array");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], json!("EXPENSE_RECORDED"));
    assert_eq!(logs[0]["actor"]["name"], json!("Asha"));
}
