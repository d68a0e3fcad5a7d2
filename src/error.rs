/// Failures surfaced by the credential verifier.
///
/// `InvalidCredentials` deliberately covers unknown emails, inactive accounts and wrong
/// passwords alike. Callers must not try to tell those apart.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is locked")]
    AccountLocked,

    #[error("forbidden")]
    Forbidden,

    #[error("account already exists")]
    DuplicateAccount,

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("account not found")]
    NotFound,

    #[error("persistence failure: {0:#}")]
    PersistenceFailure(anyhow::Error),

    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}
