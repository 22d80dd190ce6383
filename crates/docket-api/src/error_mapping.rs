// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiErrorCode;

/// HTTP status for each error code. The api crate stays transport-agnostic;
/// the server turns these into real status codes.
#[must_use]
pub fn http_status(code: ApiErrorCode) -> u16 {
    match code {
        ApiErrorCode::Unauthenticated => 401,
        ApiErrorCode::Forbidden => 403,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::ValidationFailed => 400,
        ApiErrorCode::Internal => 500,
    }
}
