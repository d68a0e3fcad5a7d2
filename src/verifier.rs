use std::sync::Arc;

use anyhow::{Result, anyhow};
use time::OffsetDateTime;

use crate::error::AuthError;
use crate::lockout::LockoutPolicy;
use crate::model::{Claims, PublicAccount, Role};
use crate::password::PasswordHasher;
use crate::session::SessionSigner;
use crate::store::AccountStore;

mod admin;
mod authenticate;
mod register;

/// A successful login: the signed token plus what the caller may see of the account.
#[derive(Clone, Debug)]
pub struct Authenticated {
    pub token: String,
    pub claims: Claims,
    pub user: PublicAccount,
}

#[derive(Clone, Debug)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Decides whether presented credentials authenticate an account, keeps the lockout
/// bookkeeping, and issues session tokens.
///
/// All methods are synchronous and may hash passwords; async callers should run them on a
/// blocking thread.
pub struct CredentialVerifier {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    signer: SessionSigner,
    policy: LockoutPolicy,

    // Compared against when the email is unknown so both paths pay the hashing cost.
    decoy_hash: String,
}

impl CredentialVerifier {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: PasswordHasher,
        signer: SessionSigner,
        policy: LockoutPolicy,
    ) -> Result<Self> {
        let decoy_hash = hasher.hash(&generate_id()?)?;
        Ok(Self {
            store,
            hasher,
            signer,
            policy,
            decoy_hash,
        })
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    pub fn verify_session(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_session_at(token, OffsetDateTime::now_utc())
    }

    pub fn verify_session_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, AuthError> {
        self.signer.verify(token, now)
    }
}

/// Random account id: blake3 over the email, creation time and 32 bytes of entropy.
pub(crate) fn derive_account_id(email: &str, created_at: OffsetDateTime) -> Result<String> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(email.as_bytes());
    hasher.update(b"\n");
    hasher.update(&created_at.unix_timestamp_nanos().to_le_bytes());
    hasher.update(b"\n");
    hasher.update(generate_id()?.as_bytes());
    let mut id = hasher.finalize().to_hex().to_string();
    id.truncate(32);
    Ok(id)
}

fn generate_id() -> Result<String> {
    // 32 bytes of entropy, hex-encoded.
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "tests/verifier_tests.rs"]
mod tests;
