mod support;

use docket_server::MemoryStore;
use serde_json::json;
use std::sync::Arc;
use support::{json, login, request, seed_user, spawn_app};

#[tokio::test]
async fn health_is_public() {
    let addr = spawn_app(Arc::new(MemoryStore::new())).await;
    let (status, body) = request(addr, "GET", "/api/health", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body), json!({"status": "ok"}));
}

#[tokio::test]
async fn authenticated_routes_reject_missing_and_bad_tokens() {
    let addr = spawn_app(Arc::new(MemoryStore::new())).await;

    let (status, body) = request(addr, "GET", "/api/cases", None, None).await;
    assert_eq!(status, 401);
    assert_eq!(json(&body)["message"], json!("No token provided"));

    let (status, body) = request(addr, "GET", "/api/cases", Some("not-a-jwt"), None).await;
    assert_eq!(status, 401);
    assert_eq!(json(&body)["message"], json!("Invalid token"));
}

#[tokio::test]
async fn login_returns_token_and_user_or_401() {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Admin",
        "admin@example.com",
        "Password@123",
        "ADMIN",
    )
    .await;
    let addr = spawn_app(store).await;

    let (status, body) = request(
        addr,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "admin@example.com", "password": "Password@123"})),
    )
    .await;
    assert_eq!(status, 200);
    let body = json(&body);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], json!("admin@example.com"));
    assert_eq!(body["user"]["role"], json!("ADMIN"));

    let (status, body) = request(
        addr,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "admin@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(json(&body)["message"], json!("Invalid credentials"));

    let (status, _) = request(
        addr,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "ghost@example.com", "password": "Password@123"})),
    )
    .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn register_is_admin_only_and_rejects_duplicates() {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Admin",
        "admin@example.com",
        "Password@123",
        "ADMIN",
    )
    .await;
    seed_user(
        &store,
        "Asha",
        "asha@example.com",
        "Password@123",
        "ATTORNEY",
    )
    .await;
    let addr = spawn_app(store).await;

    let attorney_token = login(addr, "asha@example.com", "Password@123").await;
    let (status, body) = request(
        addr,
        "POST",
        "/api/auth/register",
        Some(&attorney_token),
        Some(json!({"name": "P", "email": "p@example.com", "password": "pw"})),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(json(&body)["message"], json!("Forbidden: insufficient role"));

    let admin_token = login(addr, "admin@example.com", "Password@123").await;
    let (status, body) = request(
        addr,
        "POST",
        "/api/auth/register",
        Some(&admin_token),
        Some(json!({
            "name": "Priya",
            "email": "priya@example.com",
            "password": "Password@123",
            "role": "PARALEGAL",
        })),
    )
    .await;
    assert_eq!(status, 201);
    let created = json(&body);
    assert_eq!(created["role"], json!("PARALEGAL"));
    assert!(created["id"].as_str().is_some());

    let (status, body) = request(
        addr,
        "POST",
        "/api/auth/register",
        Some(&admin_token),
        Some(json!({
            "name": "Priya Again",
            "email": "priya@example.com",
            "password": "Password@123",
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(json(&body)["message"], json!("User already exists"));
}

#[tokio::test]
async fn registered_users_default_to_attorney_and_can_log_in() {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Admin",
        "admin@example.com",
        "Password@123",
        "ADMIN",
    )
    .await;
    let addr = spawn_app(store).await;

    let admin_token = login(addr, "admin@example.com", "Password@123").await;
    let (status, body) = request(
        addr,
        "POST",
        "/api/auth/register",
        Some(&admin_token),
        Some(json!({"name": "Nila", "email": "nila@example.com", "password": "S3cret!"})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(json(&body)["role"], json!("ATTORNEY"));

    let token = login(addr, "nila@example.com", "S3cret!").await;
    let (status, _) = request(addr, "GET", "/api/cases", Some(&token), None).await;
    assert_eq!(status, 200);
}
