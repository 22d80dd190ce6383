// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use docket_server::store::collections;
use docket_server::{build_router, AppState, MemoryStore, RecordStore};
use mongodb::bson::{doc, oid::ObjectId};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub async fn spawn_app(store: Arc<MemoryStore>) -> SocketAddr {
    let app = build_router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    addr
}

/// Issue one HTTP/1.1 request over a raw socket and return the status code
/// plus the response body.
pub async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (u16, String) {
    let mut head = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(token) = token {
        head.push_str(&format!("Authorization: Bearer {token}\r\n"));
    }
    let payload = body.map(|b| b.to_string()).unwrap_or_default();
    if !payload.is_empty() {
        head.push_str("Content-Type: application/json\r\n");
        head.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    }
    head.push_str("\r\n");

    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream
        .write_all(format!("{head}{payload}").as_bytes())
        .await
        .expect("write request");

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let status = response
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .expect("status code");
    let body = response
        .split_once("\r\n\r\n")
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default();
    (status, body)
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).expect("json body")
}

pub async fn seed_user(
    store: &MemoryStore,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> ObjectId {
    let hash = bcrypt::hash(password, 4).expect("hash password");
    store
        .insert(
            collections::USERS,
            doc! {"name": name, "email": email, "role": role, "passwordHash": hash},
        )
        .await
        .expect("seed user")
}

pub async fn seed_client(store: &MemoryStore, name: &str) -> ObjectId {
    store
        .insert(collections::CLIENTS, doc! {"name": name, "cases": []})
        .await
        .expect("seed client")
}

pub async fn login(addr: SocketAddr, email: &str, password: &str) -> String {
    let (status, body) = request(
        addr,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, 200, "login failed: {body}");
    json(&body)["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}
