use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result, anyhow};

use crate::model::{Account, Role, normalize_email};

mod disk;
pub use self::disk::accounts_path;

/// Record store for accounts.
///
/// `modify` is the only way to change an existing account: implementations must apply the
/// closure and persist the result as one serialized step, so concurrent read-modify-write
/// cycles on the same account cannot lose updates.
pub trait AccountStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    fn find_by_id(&self, id: &str) -> Result<Option<Account>>;

    /// Inserts a new account. Returns `None` when the email is already registered.
    fn create(&self, account: Account) -> Result<Option<Account>>;

    /// Applies `f` to the account with `id` and persists it. Returns the updated account, or
    /// `None` if no such account exists.
    fn modify(&self, id: &str, f: &mut dyn FnMut(&mut Account)) -> Result<Option<Account>>;

    fn list(&self) -> Result<Vec<Account>>;

    fn any_with_role(&self, role: Role) -> Result<bool> {
        Ok(self.list()?.iter().any(|a| a.role == role))
    }
}

#[derive(Default)]
struct Accounts {
    by_id: HashMap<String, Account>,
    email_index: HashMap<String, String>,
}

impl Accounts {
    fn from_list(list: Vec<Account>) -> Result<Self> {
        let mut out = Accounts::default();
        for mut account in list {
            account.email = normalize_email(&account.email);
            if out.email_index.contains_key(&account.email) {
                anyhow::bail!("duplicate account email {}", account.email);
            }
            out.email_index
                .insert(account.email.clone(), account.id.clone());
            out.by_id.insert(account.id.clone(), account);
        }
        Ok(out)
    }
}

/// Accounts held in memory and mirrored to `<data_dir>/accounts.json` after every change.
///
/// Without a data dir the store is purely in-memory.
pub struct FileAccountStore {
    path: Option<PathBuf>,
    inner: RwLock<Accounts>,
}

impl FileAccountStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("create data dir {}", data_dir.display()))?;
        let path = accounts_path(data_dir);
        let list = disk::load_accounts(&path)?;
        Ok(Self {
            path: Some(path),
            inner: RwLock::new(Accounts::from_list(list)?),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: RwLock::new(Accounts::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Accounts>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("account store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Accounts>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("account store lock poisoned"))
    }

    fn persist(&self, accounts: &Accounts) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        disk::persist_accounts(path, accounts.by_id.values())
    }
}

impl AccountStore for FileAccountStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let email = normalize_email(email);
        let accounts = self.read()?;
        Ok(accounts
            .email_index
            .get(&email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Account>> {
        Ok(self.read()?.by_id.get(id).cloned())
    }

    fn create(&self, mut account: Account) -> Result<Option<Account>> {
        account.email = normalize_email(&account.email);

        let mut accounts = self.write()?;
        if accounts.email_index.contains_key(&account.email) {
            return Ok(None);
        }
        if accounts.by_id.contains_key(&account.id) {
            anyhow::bail!("account id collision");
        }

        accounts
            .email_index
            .insert(account.email.clone(), account.id.clone());
        accounts.by_id.insert(account.id.clone(), account.clone());

        if let Err(err) = self.persist(&accounts) {
            accounts.email_index.remove(&account.email);
            accounts.by_id.remove(&account.id);
            return Err(err);
        }
        Ok(Some(account))
    }

    fn modify(&self, id: &str, f: &mut dyn FnMut(&mut Account)) -> Result<Option<Account>> {
        let mut accounts = self.write()?;
        let Some(previous) = accounts.by_id.get(id).cloned() else {
            return Ok(None);
        };

        let mut updated = previous.clone();
        f(&mut updated);
        // Identity fields are not editable through `modify`.
        updated.id = previous.id.clone();
        updated.email = previous.email.clone();

        accounts.by_id.insert(id.to_string(), updated.clone());
        if let Err(err) = self.persist(&accounts) {
            accounts.by_id.insert(id.to_string(), previous);
            return Err(err);
        }
        Ok(Some(updated))
    }

    fn list(&self) -> Result<Vec<Account>> {
        let mut out: Vec<Account> = self.read()?.by_id.values().cloned().collect();
        out.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(out)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
