use crate::auth::authenticate;
use crate::http::{
    json_created, json_ok, parse_body, parse_path_id, reload, to_bson_value, to_stored_doc,
    ApiFailure,
};
use crate::store::collections;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use docket_api::dto::{CreateIntakeFormRequest, UpdateIntakeStatusRequest};
use docket_api::wire::{doc_to_json, docs_to_json};
use docket_api::ApiError;
use docket_model::{IntakeForm, IntakeStatus};
use mongodb::bson::doc;
use tracing::info;

pub(crate) async fn create_intake_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateIntakeFormRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let req = parse_body(body)?;

    let form = IntakeForm {
        contact_name: req.contact_name,
        contact_email: req.contact_email,
        practice_area: req.practice_area,
        case_type: req.case_type,
        description: req.description,
        budget: req.budget,
        urgency: req.urgency.unwrap_or_default(),
        jurisdiction: req.jurisdiction,
        preferred_contact_method: req.preferred_contact_method.unwrap_or_default(),
        status: IntakeStatus::New,
        documents: req.documents.unwrap_or_default(),
    };
    form.validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let id = state
        .store
        .insert(collections::INTAKE_FORMS, to_stored_doc(&form)?)
        .await?;
    info!(intake = %id.to_hex(), "intake form submitted");
    let stored = reload(&state.store, collections::INTAKE_FORMS, id, "Intake form").await?;
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn list_intake_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let forms = state
        .store
        .find(
            collections::INTAKE_FORMS,
            doc! {},
            Some(doc! {"createdAt": -1}),
        )
        .await?;
    Ok(json_ok(docs_to_json(&forms)))
}

pub(crate) async fn update_intake_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<UpdateIntakeStatusRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    authenticate(&state, &headers).await?;
    let id = parse_path_id("Intake form", &id)?;
    let req = parse_body(body)?;

    let updated = state
        .store
        .update_by_id(
            collections::INTAKE_FORMS,
            id,
            doc! {"status": to_bson_value(&req.status)?},
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Intake form"))?;
    info!(intake = %id.to_hex(), status = ?req.status, "intake status updated");
    Ok(json_ok(doc_to_json(&updated)))
}
