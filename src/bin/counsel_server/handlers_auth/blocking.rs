use super::*;

/// Runs a verifier call on the blocking pool; password hashing is CPU bound.
pub(super) async fn run_blocking<T, F>(f: F) -> Result<T, Response>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(out)) => Ok(out),
        Ok(Err(err)) => Err(auth_error(err)),
        Err(err) => Err(internal_error(
            anyhow::Error::new(err).context("verifier task failed"),
        )),
    }
}
