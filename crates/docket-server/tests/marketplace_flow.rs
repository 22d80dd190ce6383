// SPDX-License-Identifier: Apache-2.0

mod support;

use docket_server::MemoryStore;
use serde_json::json;
use std::sync::Arc;
use support::{json, login, request, seed_user, spawn_app};

async fn app_with_two_lawyers() -> (std::net::SocketAddr, String, String) {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Asha",
        "asha@example.com",
        "Password@123",
        "ATTORNEY",
    )
    .await;
    seed_user(
        &store,
        "Ravi",
        "ravi@example.com",
        "Password@123",
        "ATTORNEY",
    )
    .await;
    let addr = spawn_app(store).await;
    let asha = login(addr, "asha@example.com", "Password@123").await;
    let ravi = login(addr, "ravi@example.com", "Password@123").await;

    let (status, _) = request(
        addr,
        "POST",
        "/api/lawyers",
        Some(&asha),
        Some(json!({
            "fullName": "Asha Rao",
            "headline": "Tax disputes and audits",
            "practiceAreas": ["Tax Law"],
            "languages": ["English", "Kannada"],
            "jurisdictions": ["Karnataka"],
            "rateType": "HOURLY",
        })),
    )
    .await;
    assert_eq!(status, 201);

    let (status, _) = request(
        addr,
        "POST",
        "/api/lawyers",
        Some(&ravi),
        Some(json!({
            "fullName": "Ravi Menon",
            "headline": "Criminal defense",
            "practiceAreas": ["Criminal Defense"],
            "languages": ["English", "Malayalam"],
            "jurisdictions": ["Kerala"],
            "rateType": "FLAT",
        })),
    )
    .await;
    assert_eq!(status, 201);
    (addr, asha, ravi)
}

#[tokio::test]
async fn practice_area_filter_is_a_case_insensitive_substring() {
    let (addr, _, _) = app_with_two_lawyers().await;

    let (status, body) = request(addr, "GET", "/api/lawyers?practiceArea=tax", None, None).await;
    assert_eq!(status, 200);
    let lawyers = json(&body);
    let lawyers = lawyers.as_array().expect("lawyers array");
    assert_eq!(lawyers.len(), 1);
    assert_eq!(lawyers[0]["fullName"], json!("Asha Rao"));
    assert_eq!(lawyers[0]["user"]["name"], json!("Asha"));

    let (status, body) = request(addr, "GET", "/api/lawyers", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body).as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn search_matches_name_headline_or_practice_areas() {
    let (addr, _, _) = app_with_two_lawyers().await;

    let (_, body) = request(addr, "GET", "/api/lawyers?search=menon", None, None).await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(1));

    let (_, body) = request(addr, "GET", "/api/lawyers?search=audits", None, None).await;
    let by_headline = json(&body);
    assert_eq!(by_headline.as_array().map(Vec::len), Some(1));
    assert_eq!(by_headline[0]["fullName"], json!("Asha Rao"));

    // Conjunctive with other terms: criminal practice area + kerala jurisdiction.
    let (_, body) = request(
        addr,
        "GET",
        "/api/lawyers?practiceArea=criminal&jurisdiction=kerala",
        None,
        None,
    )
    .await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(1));

    let (_, body) = request(
        addr,
        "GET",
        "/api/lawyers?practiceArea=criminal&jurisdiction=karnataka",
        None,
        None,
    )
    .await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn rate_type_filters_by_exact_equality_only() {
    let (addr, _, _) = app_with_two_lawyers().await;

    let (status, body) = request(addr, "GET", "/api/lawyers?rateType=FLAT", None, None).await;
    assert_eq!(status, 200);
    let flat = json(&body);
    assert_eq!(flat.as_array().map(Vec::len), Some(1));
    assert_eq!(flat[0]["fullName"], json!("Ravi Menon"));

    // No substring or case-folding on the enum field.
    for miss in ["hour", "HOUR", "hourly", "flat"] {
        let (status, body) =
            request(addr, "GET", &format!("/api/lawyers?rateType={miss}"), None, None).await;
        assert_eq!(status, 200);
        assert_eq!(json(&body).as_array().map(Vec::len), Some(0), "term {miss}");
    }

    let (_, body) = request(addr, "GET", "/api/lawyers?rateType=HOURLY", None, None).await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn profile_upsert_is_keyed_on_the_caller() {
    let (addr, asha, _) = app_with_two_lawyers().await;

    let (status, body) = request(
        addr,
        "POST",
        "/api/lawyers",
        Some(&asha),
        Some(json!({
            "fullName": "Asha Rao, Esq.",
            "practiceAreas": ["Tax Law", "Corporate"],
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(json(&body)["fullName"], json!("Asha Rao, Esq."));

    let (_, body) = request(addr, "GET", "/api/lawyers", None, None).await;
    let lawyers = json(&body);
    let lawyers = lawyers.as_array().expect("lawyers array");
    assert_eq!(lawyers.len(), 2, "upsert must not create a second profile");
}

#[tokio::test]
async fn availability_slots_are_validated_on_upsert() {
    let (addr, asha, _) = app_with_two_lawyers().await;

    let (status, body) = request(
        addr,
        "POST",
        "/api/lawyers",
        Some(&asha),
        Some(json!({
            "fullName": "Asha Rao",
            "availability": [{"dayOfWeek": 9, "startTime": "09:00", "endTime": "17:00", "timezone": "Asia/Kolkata"}],
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert!(json(&body)["message"]
        .as_str()
        .is_some_and(|m| m.contains("dayOfWeek")));
}

#[tokio::test]
async fn bookings_are_public_to_create_and_scoped_to_list() {
    let (addr, asha, ravi) = app_with_two_lawyers().await;

    let (_, body) = request(addr, "GET", "/api/lawyers?practiceArea=tax", None, None).await;
    let profile_id = json(&body)[0]["_id"].as_str().expect("profile id").to_string();

    let (status, body) = request(
        addr,
        "POST",
        "/api/bookings",
        None,
        Some(json!({
            "lawyerProfile": profile_id,
            "contactName": "Walk-in",
            "contactEmail": "walkin@example.com",
            "practiceArea": "Tax Law",
            "startsAt": "2026-09-01T10:00:00Z",
            "endsAt": "2026-09-01T11:00:00Z",
            "timezone": "Asia/Kolkata",
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    let booking = json(&body);
    assert_eq!(booking["status"], json!("REQUESTED"));
    assert_eq!(booking["lawyerProfile"]["fullName"], json!("Asha Rao"));
    let booking_id = booking["_id"].as_str().expect("booking id").to_string();

    let (status, _) = request(addr, "GET", "/api/bookings", None, None).await;
    assert_eq!(status, 401);

    // The profile owner sees the booking; an unrelated lawyer does not.
    let (_, body) = request(addr, "GET", "/api/bookings", Some(&asha), None).await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(1));
    let (_, body) = request(addr, "GET", "/api/bookings", Some(&ravi), None).await;
    assert_eq!(json(&body).as_array().map(Vec::len), Some(0));

    let (status, body) = request(
        addr,
        "PATCH",
        &format!("/api/bookings/{booking_id}"),
        Some(&asha),
        Some(json!({"status": "CONFIRMED", "meetingUrl": "https://meet.example.com/x"})),
    )
    .await;
    assert_eq!(status, 200);
    let updated = json(&body);
    assert_eq!(updated["status"], json!("CONFIRMED"));
    assert_eq!(updated["meetingUrl"], json!("https://meet.example.com/x"));

    let (status, body) = request(
        addr,
        "POST",
        "/api/bookings",
        None,
        Some(json!({
            "lawyerProfile": "ffffffffffffffffffffffff",
            "contactName": "Walk-in",
            "contactEmail": "walkin@example.com",
            "practiceArea": "Tax Law",
            "startsAt": "2026-09-01T10:00:00Z",
            "endsAt": "2026-09-01T11:00:00Z",
            "timezone": "Asia/Kolkata",
        })),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(json(&body)["message"], json!("Lawyer profile not found"));
}

#[tokio::test]
async fn intake_forms_are_public_to_submit_and_gated_to_review() {
    let store = Arc::new(MemoryStore::new());
    seed_user(
        &store,
        "Asha",
        "asha@example.com",
        "Password@123",
        "ATTORNEY",
    )
    .await;
    let addr = spawn_app(store).await;

    let (status, body) = request(
        addr,
        "POST",
        "/api/intake",
        None,
        Some(json!({
            "contactName": "Prospect",
            "contactEmail": "prospect@example.com",
            "practiceArea": "Employment",
        })),
    )
    .await;
    assert_eq!(status, 201, "{body}");
    let form = json(&body);
    assert_eq!(form["status"], json!("NEW"));
    assert_eq!(form["urgency"], json!("MEDIUM"));
    assert_eq!(form["preferredContactMethod"], json!("EMAIL"));
    let form_id = form["_id"].as_str().expect("form id").to_string();

    let (status, _) = request(addr, "GET", "/api/intake", None, None).await;
    assert_eq!(status, 401);

    let token = login(addr, "asha@example.com", "Password@123").await;
    let (status, body) = request(addr, "GET", "/api/intake", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(json(&body).as_array().map(Vec::len), Some(1));

    let (status, body) = request(
        addr,
        "PATCH",
        &format!("/api/intake/{form_id}"),
        Some(&token),
        Some(json!({"status": "IN_REVIEW"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json(&body)["status"], json!("IN_REVIEW"));

    let (status, body) = request(
        addr,
        "PATCH",
        "/api/intake/ffffffffffffffffffffffff",
        Some(&token),
        Some(json!({"status": "APPROVED"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(json(&body)["message"], json!("Intake form not found"));
}
