//! The API response envelope.
//!
//! Every endpoint answers `{success, data?, code?, message?}`: `data` on
//! success, `code` and `message` on failure, never both.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use granary_core::ledger::LedgerError;
use granary_store::{DirectoryError, OperationError, UserError};

/// Successful response with a payload.
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "data": data,
        })),
    )
        .into_response()
}

/// Failed response with an error code and a user-facing message.
pub fn failure(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "code": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Maps a ledger operation error onto the envelope.
pub fn operation_failure(error: &OperationError) -> Response {
    failure(
        status_from(error.http_status_code()),
        error.error_code(),
        error.to_string(),
    )
}

/// Maps a directory error onto the envelope.
pub fn directory_failure(error: &DirectoryError) -> Response {
    failure(
        status_from(error.http_status_code()),
        error.error_code(),
        error.to_string(),
    )
}

/// Maps a user-store error onto the envelope.
pub fn user_failure(error: &UserError) -> Response {
    failure(
        status_from(error.http_status_code()),
        error.error_code(),
        error.to_string(),
    )
}

/// Maps a ledger validation error onto the envelope.
pub fn ledger_failure(error: &LedgerError) -> Response {
    failure(
        status_from(error.http_status_code()),
        error.error_code(),
        error.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use granary_shared::types::AmountError;

    #[test]
    fn test_operation_failure_status() {
        let error = OperationError::Ledger(LedgerError::InvalidAmount(AmountError::NotPositive));
        let response = operation_failure(&error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_user_failure_status() {
        let error = UserError::UsernameTaken("Ana".to_string());
        let response = user_failure(&error);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
