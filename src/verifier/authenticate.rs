use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::{Authenticated, CredentialVerifier};
use crate::error::AuthError;
use crate::model::{Account, normalize_email};

impl CredentialVerifier {
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Authenticated, AuthError> {
        self.authenticate_at(email, password, OffsetDateTime::now_utc())
    }

    pub fn authenticate_at(
        &self,
        email: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<Authenticated, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let found = self
            .store
            .find_by_email(&email)
            .map_err(AuthError::PersistenceFailure)?;
        let account = match found {
            Some(account) if account.active => account,
            _ => {
                let _ = self.hasher.verify(password, &self.decoy_hash);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if let Some(until) = self.policy.locked_until(&account, now) {
            debug!(account_id = %account.id, %until, "login rejected: account locked");
            return Err(AuthError::AccountLocked);
        }

        if !self.hasher.verify(password, &account.password_hash) {
            self.record_failure(&account.id, now)?;
            return Err(AuthError::InvalidCredentials);
        }

        let account = self.record_success(&account.id, now)?;
        let (token, claims) = self
            .signer
            .issue(&account, now)
            .map_err(AuthError::Internal)?;
        info!(account_id = %account.id, role = %account.role, "login succeeded");

        Ok(Authenticated {
            token,
            claims,
            user: account.public(),
        })
    }

    fn record_failure(&self, id: &str, now: OffsetDateTime) -> Result<(), AuthError> {
        let policy = self.policy;
        let mut locked = None;
        let updated = self
            .store
            .modify(id, &mut |account: &mut Account| {
                locked = policy.register_failure(account, now);
            })
            .map_err(AuthError::PersistenceFailure)?;

        match (updated, locked) {
            (Some(account), Some(until)) => warn!(
                account_id = %account.id,
                attempts = account.failed_attempts,
                %until,
                "account locked after repeated login failures"
            ),
            (Some(account), None) => debug!(
                account_id = %account.id,
                attempts = account.failed_attempts,
                "login failed"
            ),
            (None, _) => {}
        }
        Ok(())
    }

    fn record_success(&self, id: &str, now: OffsetDateTime) -> Result<Account, AuthError> {
        let policy = self.policy;
        let mut locked = false;
        let updated = self
            .store
            .modify(id, &mut |account: &mut Account| {
                // The account may have been locked or deactivated since the lookup.
                if !account.active {
                    return;
                }
                if policy.is_locked(account, now) {
                    locked = true;
                    return;
                }
                policy.register_success(account, now);
            })
            .map_err(AuthError::PersistenceFailure)?;

        match updated {
            _ if locked => Err(AuthError::AccountLocked),
            Some(account) if account.active => Ok(account),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
