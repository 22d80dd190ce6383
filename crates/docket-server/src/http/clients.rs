use crate::auth::authenticate;
use crate::http::{
    json_created, json_ok, parse_body, parse_path_id, populate_id_list, reload, to_stored_doc,
    ApiFailure,
};
use crate::store::collections;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use docket_api::dto::{AttachCaseRequest, CreateClientRequest};
use docket_api::wire::{doc_to_json, docs_to_json};
use docket_api::ApiError;
use docket_model::Client;
use mongodb::bson::{doc, Bson, Document};
use tracing::info;

const CASE_FIELDS: &[&str] = &["title", "status", "caseType"];

pub(crate) async fn create_client_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let req = parse_body(body)?;

    let client = Client {
        name: req.name,
        organization: req.organization,
        email: req.email,
        phone: req.phone,
        notes: req.notes,
        cases: Vec::new(),
    };
    client
        .validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::CLIENTS, to_stored_doc(&client)?)
        .await?;
    info!(client = %id.to_hex(), "client created");
    let stored = reload(&state.store, collections::CLIENTS, id, "Client").await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_clients_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let mut clients = state
        .store
        .find(collections::CLIENTS, doc! {}, None)
        .await?;
    for client in clients.iter_mut() {
        populate_id_list(
            &state.store,
            client,
            "cases",
            collections::CASES,
            CASE_FIELDS,
        )
        .await?;
    }
    Ok(json_ok(docs_to_json(&clients)))
}

/// Link a case to a client, keeping both directions consistent. Both writes
/// are idempotent: re-attaching an already linked pair changes nothing.
pub(crate) async fn attach_case_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<AttachCaseRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let client_id = parse_path_id("Client", &id)?;
    let req = parse_body(body)?;
    let case_id = parse_path_id("Case", &req.case_id)?;

    let client: Document = state
        .store
        .find_by_id(collections::CLIENTS, client_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client"))?;
    let case: Document = state
        .store
        .find_by_id(collections::CASES, case_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Case"))?;

    let mut linked_cases: Vec<Bson> = client
        .get_array("cases")
        .map(Clone::clone)
        .unwrap_or_default();
    let mut updated_client = client;
    if !linked_cases.iter().any(|c| c.as_object_id() == Some(case_id)) {
        linked_cases.push(Bson::ObjectId(case_id));
        updated_client = state
            .store
            .update_by_id(collections::CLIENTS, client_id, doc! {"cases": linked_cases})
            .await?
            .ok_or_else(|| ApiError::not_found("Client"))?;
    }

    if case.get_object_id("client").ok() != Some(client_id) {
        state
            .store
            .update_by_id(collections::CASES, case_id, doc! {"client": client_id})
            .await?
            .ok_or_else(|| ApiError::not_found("Case"))?;
    }

    info!(client = %client_id.to_hex(), case = %case_id.to_hex(), "case attached to client");
    populate_id_list(
        &state.store,
        &mut updated_client,
        "cases",
        collections::CASES,
        CASE_FIELDS,
    )
    .await?;
    Ok(json_ok(doc_to_json(&updated_client)))
}
