use counsel::AccountView;

use super::blocking::run_blocking;
use super::*;

pub(crate) async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<AccountView>>, Response> {
    let verifier = state.verifier.clone();
    let users = run_blocking(move || verifier.list_accounts(&claims)).await?;
    Ok(Json(users))
}

async fn set_active(
    state: Arc<AppState>,
    claims: Claims,
    id: String,
    active: bool,
) -> Result<Json<AccountView>, Response> {
    let verifier = state.verifier.clone();
    let view = run_blocking(move || verifier.set_active(&claims, &id, active)).await?;
    Ok(Json(view))
}

pub(crate) async fn deactivate_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<AccountView>, Response> {
    set_active(state, claims, id, false).await
}

pub(crate) async fn activate_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<AccountView>, Response> {
    set_active(state, claims, id, true).await
}
