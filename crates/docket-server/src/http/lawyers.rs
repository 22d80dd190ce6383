use crate::auth::authenticate;
use crate::http::{
    json_created, json_ok, parse_path_id, populate_each, populate_one, to_stored_doc, ApiFailure,
};
use crate::store::collections;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use docket_api::dto::UpsertLawyerProfileRequest;
use docket_api::params::{escape_regex_literal, parse_lawyer_search_params, LawyerSearchParams};
use docket_api::wire::{doc_to_json, docs_to_json};
use docket_api::ApiError;
use docket_model::LawyerProfile;
use mongodb::bson::{doc, Bson, Document};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

const USER_FIELDS: &[&str] = &["name", "email", "role"];

fn substring_condition(term: &str) -> Bson {
    Bson::Document(doc! {"$regex": escape_regex_literal(term), "$options": "i"})
}

/// Conjunctive filter: every provided term must match its field; `search`
/// alone is disjunctive over fullName/headline/practiceAreas. `rateType` is
/// an exact equality match, the rest are substring terms.
fn search_filter(params: &LawyerSearchParams) -> Document {
    let mut filter = Document::new();
    if let Some(term) = &params.practice_area {
        filter.insert("practiceAreas", substring_condition(term));
    }
    if let Some(term) = &params.language {
        filter.insert("languages", substring_condition(term));
    }
    if let Some(term) = &params.jurisdiction {
        filter.insert("jurisdictions", substring_condition(term));
    }
    if let Some(term) = &params.rate_type {
        filter.insert("rateType", term.as_str());
    }
    if let Some(term) = &params.search {
        filter.insert(
            "$or",
            vec![
                doc! {"fullName": substring_condition(term)},
                doc! {"headline": substring_condition(term)},
                doc! {"practiceAreas": substring_condition(term)},
            ],
        );
    }
    filter
}

async fn upsert_profile(
    state: AppState,
    headers: HeaderMap,
    body: Result<Json<UpsertLawyerProfileRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    let req = crate::http::parse_body(body)?;

    let profile = LawyerProfile {
        user: identity.id,
        full_name: req.full_name,
        headline: req.headline,
        bio: req.bio,
        practice_areas: req.practice_areas.unwrap_or_default(),
        jurisdictions: req.jurisdictions.unwrap_or_default(),
        languages: req.languages.unwrap_or_default(),
        rate_type: req.rate_type.unwrap_or_default(),
        rate_amount: req.rate_amount,
        availability: req.availability.unwrap_or_default(),
        years_experience: req.years_experience,
        verification_status: req.verification_status.unwrap_or_default(),
        badges: req.badges.unwrap_or_default(),
        reviews_summary: req.reviews_summary.unwrap_or_default(),
    };
    profile
        .validate()
        .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let stored = state
        .store
        .upsert_one(
            collections::LAWYER_PROFILES,
            doc! {"user": identity.id},
            to_stored_doc(&profile)?,
        )
        .await?;
    info!(user = %identity.id.to_hex(), "lawyer profile upserted");
    Ok(json_created(doc_to_json(&stored)))
}

pub(crate) async fn upsert_profile_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<UpsertLawyerProfileRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    upsert_profile(state, headers, body).await
}

/// PUT variant: the path id is accepted but the upsert is still keyed on the
/// caller's own user id.
pub(crate) async fn upsert_profile_by_id_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(_id): Path<String>,
    body: Result<Json<UpsertLawyerProfileRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    upsert_profile(state, headers, body).await
}

pub(crate) async fn list_lawyers_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiFailure> {
    let query: BTreeMap<String, String> = params.into_iter().collect();
    let params = parse_lawyer_search_params(&query);
    let mut profiles = state
        .store
        .find(collections::LAWYER_PROFILES, search_filter(&params), None)
        .await?;
    populate_each(
        &state.store,
        &mut profiles,
        "user",
        collections::USERS,
        USER_FIELDS,
    )
    .await?;
    Ok(json_ok(docs_to_json(&profiles)))
}

pub(crate) async fn get_lawyer_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiFailure> {
    let id = parse_path_id("Lawyer profile", &id)?;
    let mut profile = state
        .store
        .find_by_id(collections::LAWYER_PROFILES, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Lawyer profile"))?;
    populate_one(
        &state.store,
        &mut profile,
        "user",
        collections::USERS,
        USER_FIELDS,
    )
    .await?;
    Ok(json_ok(doc_to_json(&profile)))
}
