//! HTTP route registration for the counsel server.

use super::handlers_auth::{activate_user, deactivate_user, list_users, login, me, register};
use super::handlers_system::{healthz, require_bearer};
use super::*;

pub(super) fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(healthz))
        .route("/api/auth/login", post(login))
}

pub(super) fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/auth/users", get(list_users))
        .route("/api/auth/users/:id/deactivate", post(deactivate_user))
        .route("/api/auth/users/:id/activate", post(activate_user))
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}
