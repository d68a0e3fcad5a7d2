use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ManagingPartner,
    Associate,
    ExecutiveAssistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ManagingPartner => "managing_partner",
            Role::Associate => "associate",
            Role::ExecutiveAssistant => "executive_assistant",
        }
    }

    /// Only managing partners may register or administer accounts.
    pub fn can_administer(&self) -> bool {
        matches!(self, Role::ManagingPartner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "managing_partner" => Ok(Role::ManagingPartner),
            "associate" => Ok(Role::Associate),
            "executive_assistant" => Ok(Role::ExecutiveAssistant),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: String,

    // Always stored normalized; see `normalize_email`.
    pub email: String,
    pub name: String,
    pub role: Role,

    pub password_hash: String,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default)]
    pub failed_attempts: u32,

    #[serde(default, with = "time::serde::rfc3339::option")]
    pub lock_until: Option<OffsetDateTime>,

    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<OffsetDateTime>,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Account {
    pub fn public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }

    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            active: self.active,
            last_login_at: self.last_login_at,
        }
    }
}

/// The account fields that may leave the server alongside a session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,

    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub role: Role,
    pub email: String,

    // Unix seconds.
    pub iat: i64,
    pub exp: i64,
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
