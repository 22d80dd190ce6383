use crate::auth::{authenticate, maybe_authenticate};
use crate::http::{
    json_created, json_ok, parse_body, parse_path_id, populate_each, populate_one, reload,
    to_bson_value, to_stored_doc, ApiFailure,
};
use crate::store::collections;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use docket_api::dto::{CreateBookingRequest, UpdateBookingRequest};
use docket_api::wire::{doc_to_json, docs_to_json};
use docket_api::ApiError;
use docket_model::{Booking, BookingStatus};
use mongodb::bson::{doc, DateTime, Document};
use tracing::info;

pub(crate) async fn create_booking_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let req = parse_body(body)?;
    let profile_id = parse_path_id("Lawyer profile", &req.lawyer_profile)?;
    state
        .store
        .find_by_id(collections::LAWYER_PROFILES, profile_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Lawyer profile"))?;

    // Public endpoint; a valid token, when present, attaches the creator so
    // the booking shows up in that caller's scoped listing.
    let created_by = maybe_authenticate(&state, &headers)
        .await
        .map(|identity| identity.id);
    let booking = Booking {
        lawyer_profile: profile_id,
        created_by,
        contact_name: req.contact_name,
        contact_email: req.contact_email,
        practice_area: req.practice_area,
        message: req.message,
        starts_at: DateTime::from_chrono(req.starts_at),
        ends_at: DateTime::from_chrono(req.ends_at),
        timezone: req.timezone,
        status: BookingStatus::Requested,
        meeting_url: None,
        rate_type: req.rate_type.unwrap_or_default(),
        price_quote: req.price_quote,
        currency: req.currency.unwrap_or_else(|| "USD".to_string()),
    };
    booking
        .validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::BOOKINGS, to_stored_doc(&booking)?)
        .await?;
    info!(booking = %id.to_hex(), "booking requested");
    let mut stored = reload(&state.store, collections::BOOKINGS, id, "Booking").await?;
    populate_one(
        &state.store,
        &mut stored,
        "lawyerProfile",
        collections::LAWYER_PROFILES,
        &[],
    )
    .await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_bookings_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;

    // Callers see bookings they created plus those against their own profile.
    let own_profile = state
        .store
        .find_one(collections::LAWYER_PROFILES, doc! {"user": identity.id})
        .await?;
    let mut scope = vec![doc! {"createdBy": identity.id}];
    if let Some(profile) = own_profile {
        if let Ok(profile_id) = profile.get_object_id("_id") {
            scope.push(doc! {"lawyerProfile": profile_id});
        }
    }

    let mut bookings = state
        .store
        .find(
            collections::BOOKINGS,
            doc! {"$or": scope},
            Some(doc! {"createdAt": -1}),
        )
        .await?;
    populate_each(
        &state.store,
        &mut bookings,
        "lawyerProfile",
        collections::LAWYER_PROFILES,
        &[
            "fullName",
            "practiceAreas",
            "rateType",
            "rateAmount",
            "verificationStatus",
        ],
    )
    .await?;
    Ok(json_ok(docs_to_json(&bookings)))
}

pub(crate) async fn update_booking_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let id = parse_path_id("Booking", &id)?;
    let req = parse_body(body)?;

    let mut set = Document::new();
    if let Some(status) = &req.status {
        set.insert("status", to_bson_value(status)?);
    }
    if let Some(meeting_url) = &req.meeting_url {
        set.insert("meetingUrl", meeting_url.clone());
    }
    let mut updated = state
        .store
        .update_by_id(collections::BOOKINGS, id, set)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking"))?;
    info!(booking = %id.to_hex(), "booking updated");
    populate_one(
        &state.store,
        &mut updated,
        "lawyerProfile",
        collections::LAWYER_PROFILES,
        &["fullName", "practiceAreas"],
    )
    .await?;
    Ok(json_ok(doc_to_json(&updated)))
}
