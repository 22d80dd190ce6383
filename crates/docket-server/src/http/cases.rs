use crate::auth::authenticate;
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
use docket_api::dto::{CreateCaseRequest, UpdateCaseStatusRequest};
use docket_api::params::parse_object_id_param;
use docket_api::wire::{doc_to_json, docs_to_json};
use docket_api::ApiError;
use docket_model::Case;
use mongodb::bson::{doc, DateTime, Document};
use tracing::info;

const ASSIGNEE_FIELDS: &[&str] = &["name", "email", "role"];

pub(crate) async fn create_case_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateCaseRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    let req = parse_body(body)?;

    let client = req
        .client
        .as_deref()
        .map(|raw| parse_object_id_param("client", raw))
        .transpose()?;
    let case = Case {
        title: req.title,
        description: req.description,
        case_type: req.case_type,
        status: req.status.unwrap_or_default(),
        priority: req.priority.unwrap_or_default(),
        region: req.region,
        jurisdiction: req.jurisdiction,
        assigned_to: Some(identity.id),
        client,
        parties: req.parties.unwrap_or_default(),
        sla_deadline: req.sla_deadline.map(DateTime::from_chrono),
        is_legal_hold: req.is_legal_hold.unwrap_or(false),
    };
    case.validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::CASES, to_stored_doc(&case)?)
        .await?;
    info!(case = %id.to_hex(), "case created");
    let stored = reload(&state.store, collections::CASES, id, "Case").await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_cases_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let mut cases = state.store.find(collections::CASES, doc! {}, None).await?;
    populate_each(
        &state.store,
        &mut cases,
        "assignedTo",
        collections::USERS,
        ASSIGNEE_FIELDS,
    )
    .await?;
    Ok(json_ok(docs_to_json(&cases)))
}

pub(crate) async fn my_cases_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    let mut cases = state
        .store
        .find(collections::CASES, doc! {"assignedTo": identity.id}, None)
        .await?;
    populate_each(
        &state.store,
        &mut cases,
        "assignedTo",
        collections::USERS,
        ASSIGNEE_FIELDS,
    )
    .await?;
    Ok(json_ok(docs_to_json(&cases)))
}

pub(crate) async fn get_case_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let id = parse_path_id("Case", &id)?;
    let mut case: Document = state
        .store
        .find_by_id(collections::CASES, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Case"))?;
    populate_one(
        &state.store,
        &mut case,
        "assignedTo",
        collections::USERS,
        ASSIGNEE_FIELDS,
    )
    .await?;
    Ok(json_ok(doc_to_json(&case)))
}

pub(crate) async fn update_case_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<UpdateCaseStatusRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let id = parse_path_id("Case", &id)?;
    let req = parse_body(body)?;

    // Any status may follow any other; only enum membership is enforced.
    let updated = state
        .store
        .update_by_id(
            collections::CASES,
            id,
            doc! {"status": to_bson_value(&req.status)?},
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Case"))?;
    info!(case = %id.to_hex(), status = ?req.status, "case status updated");
    Ok(json_ok(doc_to_json(&updated)))
}
