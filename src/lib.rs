//! Authentication core for the Counsel case-management backend.
//!
//! The server binary (`counsel-server`) wires these pieces into an axum router; everything
//! here is synchronous and runtime-agnostic so handlers can push it onto the blocking pool.

pub mod error;
pub mod lockout;
pub mod model;
pub mod password;
pub mod session;
pub mod store;
pub mod verifier;

pub use self::error::AuthError;
pub use self::lockout::LockoutPolicy;
pub use self::model::{Account, AccountView, Claims, PublicAccount, Role};
pub use self::password::PasswordHasher;
pub use self::session::SessionSigner;
pub use self::store::{AccountStore, FileAccountStore};
pub use self::verifier::{Authenticated, CredentialVerifier, NewAccount};
