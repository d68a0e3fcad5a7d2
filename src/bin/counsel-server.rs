#![allow(clippy::result_large_err)]

use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use counsel::{AuthError, Claims, CredentialVerifier};

#[path = "counsel_server/types/mod.rs"]
mod types;
use self::types::*;
#[path = "counsel_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "counsel_server/handlers_system.rs"]
mod handlers_system;
#[path = "counsel_server/handlers_auth/mod.rs"]
mod handlers_auth;
#[path = "counsel_server/routes.rs"]
mod routes;
#[path = "counsel_server/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
