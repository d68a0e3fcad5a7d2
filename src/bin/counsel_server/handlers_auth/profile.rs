use super::*;

pub(crate) async fn me(Extension(claims): Extension<Claims>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": claims.id,
        "email": claims.email,
        "role": claims.role,
        "expires_at": claims.exp,
    }))
}
