use counsel::{NewAccount, Role};

use super::blocking::run_blocking;
use super::*;

#[derive(serde::Deserialize)]
pub(crate) struct RegisterRequest {
    #[serde(default)]
    name: String,

    #[serde(default)]
    email: String,

    #[serde(default)]
    password: String,

    #[serde(default)]
    role: String,
}

pub(crate) async fn register(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), Response> {
    // The role gate must answer before the payload is judged.
    if !claims.role.can_administer() {
        return Err(forbidden());
    }
    let Json(payload) = payload.map_err(invalid_body)?;
    let role: Role = payload.role.parse().map_err(|e: String| bad_request(&e))?;

    let verifier = state.verifier.clone();
    run_blocking(move || {
        verifier.register(
            claims.role,
            NewAccount {
                name: payload.name,
                email: payload.email,
                password: payload.password,
                role,
            },
        )
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "User created successfully."})),
    ))
}
