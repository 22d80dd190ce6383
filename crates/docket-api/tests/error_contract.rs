use docket_api::error_mapping::http_status;
use docket_api::{ApiError, ApiErrorCode};
use serde_json::json;

#[test]
fn error_codes_map_to_the_spec_status_taxonomy() {
    assert_eq!(http_status(ApiErrorCode::Unauthenticated), 401);
    assert_eq!(http_status(ApiErrorCode::Forbidden), 403);
    assert_eq!(http_status(ApiErrorCode::NotFound), 404);
    assert_eq!(http_status(ApiErrorCode::ValidationFailed), 400);
    assert_eq!(http_status(ApiErrorCode::Internal), 500);
}

#[test]
fn error_body_always_carries_a_message() {
    let err = ApiError::not_found("Case");
    let body = serde_json::to_value(&err).expect("serialize error");
    assert_eq!(body["code"], json!("NOT_FOUND"));
    assert_eq!(body["message"], json!("Case not found"));
    assert_eq!(body["details"]["entity"], json!("Case"));

    let err = ApiError::unauthenticated("No token provided");
    let body = serde_json::to_value(&err).expect("serialize error");
    assert_eq!(body["code"], json!("UNAUTHENTICATED"));
    assert_eq!(body["message"], json!("No token provided"));
}

#[test]
fn invalid_param_names_the_parameter() {
    let err = ApiError::invalid_param("caseId", "zzz");
    assert_eq!(err.code, ApiErrorCode::ValidationFailed);
    let body = serde_json::to_value(&err).expect("serialize error");
    assert_eq!(body["details"]["parameter"], json!("caseId"));
}
