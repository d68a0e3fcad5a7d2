use time::OffsetDateTime;
use tracing::info;

use super::CredentialVerifier;
use crate::error::AuthError;
use crate::model::{Account, AccountView, Claims};

impl CredentialVerifier {
    pub fn list_accounts(&self, requester: &Claims) -> Result<Vec<AccountView>, AuthError> {
        if !requester.role.can_administer() {
            return Err(AuthError::Forbidden);
        }
        let accounts = self.store.list().map_err(AuthError::PersistenceFailure)?;
        Ok(accounts.iter().map(|a| a.view()).collect())
    }

    /// Activates or deactivates an account. Accounts are never deleted.
    pub fn set_active(
        &self,
        requester: &Claims,
        id: &str,
        active: bool,
    ) -> Result<AccountView, AuthError> {
        if !requester.role.can_administer() {
            return Err(AuthError::Forbidden);
        }
        if !active && requester.id == id {
            return Err(AuthError::InvalidInput(
                "cannot deactivate your own account".to_string(),
            ));
        }

        let now = OffsetDateTime::now_utc();
        let updated = self
            .store
            .modify(id, &mut |account: &mut Account| {
                account.active = active;
                account.updated_at = now;
            })
            .map_err(AuthError::PersistenceFailure)?
            .ok_or(AuthError::NotFound)?;

        info!(
            account_id = %updated.id,
            active,
            by = %requester.id,
            "account activation changed"
        );
        Ok(updated.view())
    }
}
