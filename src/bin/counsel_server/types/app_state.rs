use super::*;

#[derive(Clone)]
pub(crate) struct AppState {
    // Holds the injected signing secret; read-only after start-up.
    pub(crate) verifier: Arc<CredentialVerifier>,
}
