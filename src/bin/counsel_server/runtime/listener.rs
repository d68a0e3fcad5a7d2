use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

/// Binds `addr` and announces the resolved address, including to `addr_file` when given so
/// callers binding port 0 can discover it.
pub(super) async fn bind_and_announce(
    addr: SocketAddr,
    addr_file: Option<&Path>,
) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    info!(%local_addr, "counsel-server listening");

    if let Some(addr_file) = addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }
    Ok(listener)
}
