use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::Account;

pub fn accounts_path(data_dir: &Path) -> PathBuf {
    data_dir.join("accounts.json")
}

pub(super) fn load_accounts(path: &Path) -> Result<Vec<Account>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

pub(super) fn persist_accounts<'a>(
    path: &Path,
    accounts: impl Iterator<Item = &'a Account>,
) -> Result<()> {
    let mut list: Vec<&Account> = accounts.collect();
    list.sort_by(|a, b| a.email.cmp(&b.email));
    let bytes = serde_json::to_vec_pretty(&list).context("serialize accounts")?;
    write_atomic_overwrite(path, &bytes).context("write accounts.json")
}

fn write_atomic_overwrite(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    let written = std::fs::write(&tmp, bytes)
        .with_context(|| format!("write {}", tmp.display()))
        .and_then(|()| {
            std::fs::rename(&tmp, path)
                .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))
        });
    if written.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    written
}
