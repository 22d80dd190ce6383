use crate::auth::{authenticate, identity_from_doc, issue_token, require_role};
use crate::http::{json_created, json_ok, parse_body, to_stored_doc, ApiFailure};
use crate::store::collections;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use docket_api::dto::{AuthUserDto, LoginRequest, LoginResponseDto, RegisterRequest};
use docket_api::ApiError;
use docket_model::{Role, User};
use mongodb::bson::doc;
use tracing::info;

pub(crate) async fn register_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let identity = authenticate(&state, &headers).await?;
    require_role(&identity, &[Role::Admin])?;
    let req = parse_body(body)?;

    let existing = state
        .store
        .find_one(collections::USERS, doc! {"email": req.email.as_str()})
        .await?;
    if existing.is_some() {
        return Err(ApiError::validation_failed("User already exists").into());
    }

    let password_hash = bcrypt::hash(&req.password, state.config.bcrypt_cost)
        .map_err(|e| ApiError::validation_failed(format!("password hashing failed: {e}")))?;
    let user = User::new(
        req.name,
        req.email,
        req.role.unwrap_or_default(),
        password_hash,
    )
    .map_err(|e| ApiError::validation_failed(e.to_string()))?;

    let doc = to_stored_doc(&user)?;
    let id = state.store.insert(collections::USERS, doc).await?;
    info!(user = %id.to_hex(), role = %user.role, "user registered");
    Ok(json_created(AuthUserDto {
        id: id.to_hex(),
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}

pub(crate) async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let req = parse_body(body)?;

    let user = state
        .store
        .find_one(collections::USERS, doc! {"email": req.email.as_str()})
        .await?
        .ok_or_else(|| ApiError::unauthenticated("Invalid credentials"))?;
    let hash = user.get_str("passwordHash").unwrap_or_default();
    if !bcrypt::verify(&req.password, hash).unwrap_or(false) {
        return Err(ApiError::unauthenticated("Invalid credentials").into());
    }

    let identity = identity_from_doc(&user)?;
    let token = issue_token(identity.id, identity.role, &state.config)?;
    info!(user = %identity.id.to_hex(), "login");
    Ok(json_ok(LoginResponseDto {
        token,
        user: AuthUserDto {
            id: identity.id.to_hex(),
            name: identity.name,
            email: identity.email,
            role: identity.role,
        },
    }))
}
