use tracing::error;

use super::*;

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(serde_json::json!({"message": msg}))).into_response()
}

pub(super) fn unauthorized(msg: &str) -> Response {
    message(StatusCode::UNAUTHORIZED, msg)
}

pub(super) fn forbidden() -> Response {
    message(StatusCode::FORBIDDEN, "Forbidden.")
}

pub(super) fn bad_request(msg: &str) -> Response {
    message(StatusCode::BAD_REQUEST, msg)
}

/// Malformed or mistyped request bodies answer with the same `{message}` shape as every
/// other failure.
pub(super) fn invalid_body(rejection: JsonRejection) -> Response {
    bad_request(&rejection.body_text())
}

pub(super) fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, "Not found.")
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    error!(error = %format!("{:#}", err), "request failed");
    message(StatusCode::INTERNAL_SERVER_ERROR, "Server error.")
}

/// Maps verifier failures onto the public HTTP contract. Internal detail is logged, never
/// returned.
pub(super) fn auth_error(err: AuthError) -> Response {
    match err {
        AuthError::InvalidCredentials => unauthorized("Invalid credentials."),
        AuthError::AccountLocked => {
            message(StatusCode::FORBIDDEN, "Account is locked. Try later.")
        }
        AuthError::Forbidden => forbidden(),
        AuthError::DuplicateAccount => bad_request("User already exists."),
        AuthError::InvalidToken => unauthorized("Invalid token."),
        AuthError::InvalidInput(msg) => bad_request(&msg),
        AuthError::NotFound => not_found(),
        AuthError::PersistenceFailure(err) => internal_error(err.context("persistence failure")),
        AuthError::Internal(err) => internal_error(err),
    }
}
