//! Bearer-token authorization gate.
//!
//! `authenticate` resolves the caller to an explicit [`Identity`] that
//! handlers thread through their signatures; any failure along the chain
//! (missing header, bad token, deleted user) is `Unauthenticated`. Role
//! membership is a separate check so the two failure modes map to 401 and
//! 403 respectively.

use crate::store::collections;
use crate::AppState;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use docket_api::ApiError;
use docket_model::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    exp: u64,
}

/// The resolved caller, threaded into handlers as a value.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

pub fn issue_token(user_id: ObjectId, role: Role, config: &crate::ApiConfig) -> Result<String, ApiError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let claims = Claims {
        sub: user_id.to_hex(),
        role,
        exp: (now + config.token_ttl).as_secs(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("token signing failed: {e}")))
}

pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthenticated("No token provided"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthenticated("No token provided"))?;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthenticated("Invalid token"))?;
    let user_id = ObjectId::parse_str(&data.claims.sub)
        .map_err(|_| ApiError::unauthenticated("Invalid token"))?;

    let user = state
        .store
        .find_by_id(collections::USERS, user_id)
        .await
        .map_err(|_| ApiError::unauthenticated("Invalid user"))?
        .ok_or_else(|| ApiError::unauthenticated("Invalid user"))?;
    identity_from_doc(&user)
}

/// Optional variant for public endpoints that attach the caller when a valid
/// token happens to be present.
pub async fn maybe_authenticate(state: &AppState, headers: &HeaderMap) -> Option<Identity> {
    authenticate(state, headers).await.ok()
}

pub fn require_role(identity: &Identity, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&identity.role) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Forbidden: insufficient role"))
    }
}

pub(crate) fn identity_from_doc(user: &Document) -> Result<Identity, ApiError> {
    let id = user
        .get_object_id("_id")
        .map_err(|_| ApiError::unauthenticated("Invalid user"))?;
    let role: Role = mongodb::bson::from_bson(user.get("role").cloned().unwrap_or(Bson::Null))
        .map_err(|_| ApiError::unauthenticated("Invalid user"))?;
    Ok(Identity {
        id,
        name: user.get_str("name").unwrap_or_default().to_string(),
        email: user.get_str("email").unwrap_or_default().to_string(),
        role,
    })
}
