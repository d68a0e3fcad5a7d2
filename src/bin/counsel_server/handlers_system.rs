use super::*;

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Rejects requests without a valid session token and exposes its claims to handlers.
pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        return unauthorized("No token provided.");
    };

    let claims = match state.verifier.verify_session(token) {
        Ok(claims) => claims,
        Err(_) => return unauthorized("Invalid token."),
    };

    let mut req = req;
    req.extensions_mut().insert(claims);
    next.run(req).await
}

#[cfg(test)]
#[path = "../../tests/bin/counsel_server/handlers_system_tests.rs"]
mod tests;
