use anyhow::{Context, Result, anyhow};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;
use crate::model::{Account, Claims};

/// Fixed validity window of an issued session token.
pub const SESSION_TTL: Duration = Duration::minutes(15);

#[derive(Debug, Serialize, Deserialize)]
struct JwtHeader {
    alg: String,
    typ: String,
}

/// Issues and verifies HS256 session tokens.
///
/// Tokens are never stored; validity is decided by signature and `exp` alone.
#[derive(Clone)]
pub struct SessionSigner {
    secret: Vec<u8>,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner").finish_non_exhaustive()
    }
}

impl SessionSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            anyhow::bail!("session signing secret cannot be empty");
        }
        Ok(Self { secret })
    }

    /// Signer with 32 random bytes of secret; its tokens die with the process.
    pub fn ephemeral() -> Result<Self> {
        let mut secret = [0u8; 32];
        getrandom::getrandom(&mut secret).map_err(|e| anyhow!("getrandom: {:?}", e))?;
        Self::new(secret.to_vec())
    }

    pub fn issue(&self, account: &Account, now: OffsetDateTime) -> Result<(String, Claims)> {
        let claims = Claims {
            id: account.id.clone(),
            role: account.role,
            email: account.email.clone(),
            iat: now.unix_timestamp(),
            exp: (now + SESSION_TTL).unix_timestamp(),
        };
        let token = self.encode(&claims)?;
        Ok((token, claims))
    }

    pub fn verify(&self, token: &str, now: OffsetDateTime) -> Result<Claims, AuthError> {
        let claims = self.decode(token).map_err(|_| AuthError::InvalidToken)?;
        if now.unix_timestamp() >= claims.exp {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    fn mac(&self) -> Result<Hmac<Sha256>> {
        Hmac::<Sha256>::new_from_slice(&self.secret).map_err(|e| anyhow!("invalid HMAC key: {e}"))
    }

    fn encode(&self, claims: &Claims) -> Result<String> {
        let header = JwtHeader {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };
        let header_json = serde_json::to_vec(&header).context("serialize JWT header")?;
        let claims_json = serde_json::to_vec(claims).context("serialize JWT claims")?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    fn decode(&self, token: &str) -> Result<Claims> {
        let mut parts = token.trim().split('.');
        let (Some(header_b64), Some(payload_b64), Some(sig_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            anyhow::bail!("invalid JWT format");
        };

        let header: JwtHeader = serde_json::from_slice(
            &URL_SAFE_NO_PAD
                .decode(header_b64)
                .context("decode JWT header")?,
        )
        .context("parse JWT header")?;
        if header.alg != "HS256" || !header.typ.eq_ignore_ascii_case("JWT") {
            anyhow::bail!("unsupported JWT header");
        }

        let sig = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .context("decode JWT signature")?;
        let mut mac = self.mac()?;
        mac.update(format!("{}.{}", header_b64, payload_b64).as_bytes());
        mac.verify_slice(&sig)
            .map_err(|_| anyhow!("invalid JWT signature"))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .context("decode JWT payload")?;
        serde_json::from_slice(&payload).context("parse JWT claims")
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
