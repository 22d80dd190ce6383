//! Handler plumbing shared across the per-entity modules: error-to-response
//! conversion, body parsing, id parsing, and reference expansion
//! ("populate"): replacing an id-valued field with a projection of the
//! referenced document via one extra read.

use crate::{RecordStore, StoreError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docket_api::error_mapping::http_status;
use docket_api::ApiError;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::json;
use std::sync::Arc;

pub(crate) mod auth;
pub(crate) mod billing;
pub(crate) mod bookings;
pub(crate) mod cases;
pub(crate) mod clients;
pub(crate) mod diary;
pub(crate) mod intake;
pub(crate) mod lawyers;

pub(crate) async fn health_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Carrier turning an [`ApiError`] into the HTTP response; handlers return
/// `Result<Response, ApiFailure>` and use `?` throughout.
pub(crate) struct ApiFailure(pub ApiError);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(http_status(self.0.code))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

impl From<ApiError> for ApiFailure {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

// Store-layer rejections surface as 400s, like every other handler-level
// failure that is not an auth or lookup miss.
impl From<StoreError> for ApiFailure {
    fn from(err: StoreError) -> Self {
        Self(ApiError::validation_failed(err.to_string()))
    }
}

pub(crate) fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiFailure> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiFailure(ApiError::validation_failed(rejection.body_text())))
}

pub(crate) fn json_ok<T: serde::Serialize>(value: T) -> Response {
    Json(value).into_response()
}

pub(crate) fn json_created<T: serde::Serialize>(value: T) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

/// Path ids that do not parse cannot name a record, so they read as misses.
pub(crate) fn parse_path_id(entity: &str, raw: &str) -> Result<ObjectId, ApiFailure> {
    ObjectId::parse_str(raw).map_err(|_| ApiFailure(ApiError::not_found(entity)))
}

pub(crate) fn to_stored_doc<T: serde::Serialize>(record: &T) -> Result<Document, ApiFailure> {
    mongodb::bson::to_document(record)
        .map_err(|e| ApiFailure(ApiError::validation_failed(e.to_string())))
}

pub(crate) fn to_bson_value<T: serde::Serialize>(value: &T) -> Result<Bson, ApiFailure> {
    mongodb::bson::to_bson(value).map_err(|e| ApiFailure(ApiError::validation_failed(e.to_string())))
}

/// Re-read a just-written record so responses carry the stamps the store
/// added.
pub(crate) async fn reload(
    store: &Arc<dyn RecordStore>,
    collection: &str,
    id: ObjectId,
    entity: &str,
) -> Result<Document, ApiFailure> {
    store
        .find_by_id(collection, id)
        .await?
        .ok_or_else(|| ApiFailure(ApiError::not_found(entity)))
}

fn project(doc: &Document, fields: &[&str]) -> Document {
    if fields.is_empty() {
        return doc.clone();
    }
    let mut out = Document::new();
    if let Some(id) = doc.get("_id") {
        out.insert("_id", id.clone());
    }
    for field in fields {
        if let Some(value) = doc.get(*field) {
            out.insert((*field).to_string(), value.clone());
        }
    }
    out
}

/// Expand `doc[field]` from an id into the referenced document, projected to
/// `fields` (empty = whole document). Dangling references become null, as
/// the store's populate does.
pub(crate) async fn populate_one(
    store: &Arc<dyn RecordStore>,
    doc: &mut Document,
    field: &str,
    collection: &str,
    fields: &[&str],
) -> Result<(), StoreError> {
    let Some(Bson::ObjectId(id)) = doc.get(field).cloned() else {
        return Ok(());
    };
    match store.find_by_id(collection, id).await? {
        Some(referenced) => {
            doc.insert(field.to_string(), project(&referenced, fields));
        }
        None => {
            doc.insert(field.to_string(), Bson::Null);
        }
    }
    Ok(())
}

pub(crate) async fn populate_each(
    store: &Arc<dyn RecordStore>,
    docs: &mut [Document],
    field: &str,
    collection: &str,
    fields: &[&str],
) -> Result<(), StoreError> {
    for doc in docs.iter_mut() {
        populate_one(store, doc, field, collection, fields).await?;
    }
    Ok(())
}

/// Expand an id-array field (e.g. a client's case list) in place, dropping
/// dangling references.
pub(crate) async fn populate_id_list(
    store: &Arc<dyn RecordStore>,
    doc: &mut Document,
    field: &str,
    collection: &str,
    fields: &[&str],
) -> Result<(), StoreError> {
    let ids: Vec<ObjectId> = doc
        .get_array(field)
        .map(|items| items.iter().filter_map(Bson::as_object_id).collect())
        .unwrap_or_default();
    let mut expanded = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(referenced) = store.find_by_id(collection, id).await? {
            expanded.push(Bson::Document(project(&referenced, fields)));
        }
    }
    doc.insert(field.to_string(), Bson::Array(expanded));
    Ok(())
}
