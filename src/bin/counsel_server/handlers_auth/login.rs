use counsel::PublicAccount;

use super::blocking::run_blocking;
use super::*;

#[derive(serde::Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    email: String,

    #[serde(default)]
    password: String,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct LoginResponse {
    token: String,
    user: PublicAccount,
}

pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, Response> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let verifier = state.verifier.clone();
    let auth =
        run_blocking(move || verifier.authenticate(&payload.email, &payload.password)).await?;

    Ok(Json(LoginResponse {
        token: auth.token,
        user: auth.user,
    }))
}
