use std::num::NonZeroU32;

use anyhow::{Context, Result, anyhow};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const OUTPUT_LEN: usize = 32;

pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// One-way password hashing with a fixed work factor.
///
/// Hashes are self-describing (`$pbkdf2-sha256$i=<iterations>$<salt>$<hash>`), so raising the
/// configured work factor later does not invalidate existing accounts.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            iterations: NonZeroU32::new(DEFAULT_ITERATIONS).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl PasswordHasher {
    pub fn new(iterations: NonZeroU32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> NonZeroU32 {
        self.iterations
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        let mut salt = [0u8; SALT_LEN];
        getrandom::getrandom(&mut salt).map_err(|e| anyhow!("getrandom: {:?}", e))?;

        let mut out = [0u8; OUTPUT_LEN];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, self.iterations.get(), &mut out);

        Ok(format!(
            "${}$i={}${}${}",
            SCHEME,
            self.iterations.get(),
            STANDARD_NO_PAD.encode(salt),
            STANDARD_NO_PAD.encode(out)
        ))
    }

    /// Constant-time comparison of `password` against a stored hash.
    ///
    /// A malformed stored hash never matches.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok((iterations, salt, expected)) = parse_hash(stored) else {
            return false;
        };
        let mut out = vec![0u8; expected.len()];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations.get(), &mut out);
        out.ct_eq(&expected).into()
    }
}

fn parse_hash(stored: &str) -> Result<(NonZeroU32, Vec<u8>, Vec<u8>)> {
    let mut parts = stored.split('$');
    if parts.next() != Some("") || parts.next() != Some(SCHEME) {
        anyhow::bail!("unsupported password hash scheme");
    }

    let iterations = parts
        .next()
        .and_then(|p| p.strip_prefix("i="))
        .context("missing iteration count")?
        .parse::<NonZeroU32>()
        .context("parse iteration count")?;
    let salt = STANDARD_NO_PAD
        .decode(parts.next().context("missing salt")?)
        .context("decode salt")?;
    let expected = STANDARD_NO_PAD
        .decode(parts.next().context("missing hash")?)
        .context("decode hash")?;
    if parts.next().is_some() || expected.len() != OUTPUT_LEN {
        anyhow::bail!("malformed password hash");
    }

    Ok((iterations, salt, expected))
}

#[cfg(test)]
#[path = "tests/password_tests.rs"]
mod tests;
