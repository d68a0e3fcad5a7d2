use time::OffsetDateTime;
use tracing::info;

use super::{CredentialVerifier, NewAccount, derive_account_id};
use crate::error::AuthError;
use crate::model::{Account, PublicAccount, Role, normalize_email};

impl CredentialVerifier {
    /// Creates an account on behalf of `requester_role`.
    ///
    /// The role gate runs before anything else, including the duplicate check.
    pub fn register(
        &self,
        requester_role: Role,
        new: NewAccount,
    ) -> Result<PublicAccount, AuthError> {
        if !requester_role.can_administer() {
            return Err(AuthError::Forbidden);
        }
        self.create_account(new, OffsetDateTime::now_utc())
    }

    /// Seeds the first managing partner. Returns `None` when one already exists.
    pub fn bootstrap(&self, new: NewAccount) -> Result<Option<PublicAccount>, AuthError> {
        let exists = self
            .store
            .any_with_role(Role::ManagingPartner)
            .map_err(AuthError::PersistenceFailure)?;
        if exists {
            return Ok(None);
        }
        let new = NewAccount {
            role: Role::ManagingPartner,
            ..new
        };
        self.create_account(new, OffsetDateTime::now_utc()).map(Some)
    }

    fn create_account(
        &self,
        new: NewAccount,
        now: OffsetDateTime,
    ) -> Result<PublicAccount, AuthError> {
        let name = new.name.trim();
        let email = normalize_email(&new.email);
        if name.is_empty() {
            return Err(AuthError::InvalidInput("name is required".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidInput(
                "a valid email is required".to_string(),
            ));
        }
        if new.password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".to_string()));
        }

        // Cheap check before paying for the hash; `create` re-checks under its lock.
        if self
            .store
            .find_by_email(&email)
            .map_err(AuthError::PersistenceFailure)?
            .is_some()
        {
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self
            .hasher
            .hash(&new.password)
            .map_err(AuthError::Internal)?;
        let id = derive_account_id(&email, now).map_err(AuthError::Internal)?;

        let account = Account {
            id,
            email,
            name: name.to_string(),
            role: new.role,
            password_hash,
            active: true,
            failed_attempts: 0,
            lock_until: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };

        match self
            .store
            .create(account)
            .map_err(AuthError::PersistenceFailure)?
        {
            Some(account) => {
                info!(account_id = %account.id, role = %account.role, "account registered");
                Ok(account.public())
            }
            None => Err(AuthError::DuplicateAccount),
        }
    }
}
