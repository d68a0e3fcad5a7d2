use std::sync::Arc;

use axum::Router;
use counsel::CredentialVerifier;

use super::super::routes::{authed_router, public_router};
use super::super::types::AppState;

pub(super) fn build_state(verifier: CredentialVerifier) -> Arc<AppState> {
    Arc::new(AppState {
        verifier: Arc::new(verifier),
    })
}

pub(super) fn build_app_router(state: Arc<AppState>) -> Router {
    public_router()
        .merge(authed_router(state.clone()))
        .with_state(state)
}
