use std::sync::Arc;

use anyhow::{Context, Result};
use counsel::{
    AccountStore, CredentialVerifier, FileAccountStore, LockoutPolicy, NewAccount,
    PasswordHasher, Role, SessionSigner,
};
use time::Duration;
use tracing::{debug, info, warn};

use super::Args;

pub(super) fn build_verifier(args: &Args) -> Result<CredentialVerifier> {
    let store = FileAccountStore::open(&args.data_dir).context("open account store")?;

    let signer = match args.jwt_secret.as_deref() {
        Some(secret) if !secret.is_empty() => {
            SessionSigner::new(secret.as_bytes().to_vec()).context("session signer")?
        }
        _ => {
            warn!("no JWT secret configured; using an ephemeral one, sessions end on restart");
            SessionSigner::ephemeral().context("ephemeral session signer")?
        }
    };

    let policy = LockoutPolicy::new(
        args.lockout_threshold,
        Duration::minutes(args.lockout_minutes),
    );

    CredentialVerifier::new(
        Arc::new(store),
        PasswordHasher::new(args.password_iterations),
        signer,
        policy,
    )
    .context("build credential verifier")
}

/// Seeds the first managing partner from the bootstrap credentials, if given.
///
/// Without a managing partner nobody can call the register endpoint.
pub(super) fn seed_bootstrap_account(args: &Args, verifier: &CredentialVerifier) -> Result<()> {
    let (email, password) = match (&args.bootstrap_email, &args.bootstrap_password) {
        (Some(email), Some(password)) => (email, password),
        (None, None) => {
            if !verifier
                .store()
                .any_with_role(Role::ManagingPartner)
                .context("inspect account store")?
            {
                warn!(
                    "no managing partner exists; pass --bootstrap-email and --bootstrap-password to seed one"
                );
            }
            return Ok(());
        }
        _ => anyhow::bail!("--bootstrap-email and --bootstrap-password must be given together"),
    };

    let seeded = verifier
        .bootstrap(NewAccount {
            name: args.bootstrap_name.clone(),
            email: email.clone(),
            password: password.clone(),
            role: Role::ManagingPartner,
        })
        .context("seed managing partner")?;

    match seeded {
        Some(account) => info!(account_id = %account.id, email = %account.email, "seeded managing partner"),
        None => debug!("managing partner already present; bootstrap skipped"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../tests/bin/counsel_server/runtime/identity_tests.rs"]
mod tests;
