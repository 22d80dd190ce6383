use crate::auth::authenticate;
use crate::http::{
    json_created, json_ok, parse_body, populate_each, populate_one, reload, to_stored_doc,
    ApiFailure,
};
use crate::store::collections;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use docket_api::dto::CreateDiaryEntryRequest;
use docket_api::params::parse_object_id_param;
use docket_api::wire::{doc_to_json, docs_to_json};
use docket_api::ApiError;
use docket_model::DiaryEntry;
use mongodb::bson::{doc, DateTime};
use std::collections::HashMap;

const CASE_FIELDS: &[&str] = &["title", "status", "caseType"];

pub(crate) async fn create_diary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateDiaryEntryRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    let req = parse_body(body)?;

    let case = req
        .case
        .as_deref()
        .map(|raw| parse_object_id_param("case", raw))
        .transpose()?;
    let entry = DiaryEntry {
        title: req.title,
        note: req.note,
        date: req.date.map(DateTime::from_chrono).unwrap_or_else(DateTime::now),
        owner: identity.id,
        case,
        priority: req.priority.unwrap_or_default(),
    };
    entry
        .validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::DIARY_ENTRIES, to_stored_doc(&entry)?)
        .await?;
    let mut stored = reload(&state.store, collections::DIARY_ENTRIES, id, "Diary entry").await?;
    populate_one(
        &state.store,
        &mut stored,
        "case",
        collections::CASES,
        CASE_FIELDS,
    )
    .await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_diary_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;

    // Owner-scoped: only the creating user ever sees an entry.
    let mut filter = doc! {"owner": identity.id};
    if let Some(raw) = params.get("caseId") {
        filter.insert("case", parse_object_id_param("caseId", raw)?);
    }
    let mut entries = state
        .store
        .find(
            collections::DIARY_ENTRIES,
            filter,
            Some(doc! {"date": -1, "createdAt": -1}),
        )
        .await?;
    populate_each(
        &state.store,
        &mut entries,
        "case",
        collections::CASES,
        CASE_FIELDS,
    )
    .await?;
    Ok(json_ok(docs_to_json(&entries)))
}
