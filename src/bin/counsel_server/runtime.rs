use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[path = "runtime/app.rs"]
mod app;
#[path = "runtime/identity.rs"]
mod identity;
#[path = "runtime/listener.rs"]
mod listener;
#[path = "runtime/logging.rs"]
mod logging;
#[path = "runtime/shutdown.rs"]
mod shutdown;

use self::app::{build_app_router, build_state};
use self::identity::{build_verifier, seed_bootstrap_account};
use self::listener::bind_and_announce;
use self::logging::init_logging;
use self::shutdown::shutdown_signal;

#[derive(Parser)]
#[command(name = "counsel-server")]
#[command(about = "Counsel authentication service", long_about = None)]
pub(super) struct Args {
    /// Address to listen on
    #[arg(long, env = "COUNSEL_ADDR", default_value = "127.0.0.1:5000")]
    pub(super) addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    pub(super) addr_file: Option<PathBuf>,

    /// Directory holding accounts.json
    #[arg(long, env = "COUNSEL_DATA_DIR", default_value = "./counsel-data")]
    pub(super) data_dir: PathBuf,

    /// Secret used to sign session tokens.
    ///
    /// When unset a random secret is generated and sessions do not survive a restart.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub(super) jwt_secret: Option<String>,

    /// PBKDF2 iteration count for newly hashed passwords
    #[arg(long, default_value = "600000")]
    pub(super) password_iterations: NonZeroU32,

    /// Consecutive failed logins before an account is locked
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub(super) lockout_threshold: u32,

    /// Lock duration in minutes
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i64).range(1..))]
    pub(super) lockout_minutes: i64,

    /// Email of the managing partner to seed when none exists yet
    #[arg(long, env = "COUNSEL_BOOTSTRAP_EMAIL")]
    pub(super) bootstrap_email: Option<String>,

    /// Password of the seeded managing partner
    #[arg(long, env = "COUNSEL_BOOTSTRAP_PASSWORD", hide_env_values = true)]
    pub(super) bootstrap_password: Option<String>,

    /// Display name of the seeded managing partner
    #[arg(long, default_value = "Managing Partner")]
    pub(super) bootstrap_name: String,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let verifier = build_verifier(&args)?;
    seed_bootstrap_account(&args, &verifier)?;

    let app = build_app_router(build_state(verifier));
    let listener = bind_and_announce(args.addr, args.addr_file.as_deref()).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
