use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub const SECRET: &str = "integration-test-secret";
pub const MP_EMAIL: &str = "colin@colinandcolin.com";
pub const MP_PASSWORD: &str = "managing-partner-password";

pub struct ServerGuard {
    pub base_url: String,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawns the server against `data_dir`, seeding the managing partner on first start.
pub fn spawn_server_in(data_dir: &Path, extra_args: &[&str]) -> Result<ServerGuard> {
    let addr_file = data_dir.join("addr.txt");
    let _ = std::fs::remove_file(&addr_file);

    let child = Command::new(env!("CARGO_BIN_EXE_counsel-server"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--jwt-secret",
            SECRET,
            "--password-iterations",
            "1000",
            "--bootstrap-email",
            MP_EMAIL,
            "--bootstrap-password",
            MP_PASSWORD,
        ])
        .args(extra_args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn counsel-server")?;

    let mut guard = ServerGuard {
        base_url: String::new(),
        child,
    };
    guard.base_url = read_addr_file(&addr_file)?;
    wait_for_health(&guard.base_url)?;
    Ok(guard)
}

#[allow(dead_code)]
pub struct TempServer {
    pub server: ServerGuard,
    _data_dir: tempfile::TempDir,
}

impl std::ops::Deref for TempServer {
    type Target = ServerGuard;

    fn deref(&self) -> &ServerGuard {
        &self.server
    }
}

#[allow(dead_code)]
pub fn spawn_server() -> Result<TempServer> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let server = spawn_server_in(data_dir.path(), &[])?;
    Ok(TempServer {
        server,
        _data_dir: data_dir,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(10) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_health(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(10) {
            anyhow::bail!("server did not become healthy at {}/api/health", base_url);
        }
        match client.get(format!("{}/api/health", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

#[allow(dead_code)]
pub fn login(base_url: &str, email: &str, password: &str) -> Result<reqwest::blocking::Response> {
    reqwest::blocking::Client::new()
        .post(format!("{}/api/auth/login", base_url))
        .json(&serde_json::json!({"email": email, "password": password}))
        .send()
        .context("POST /api/auth/login")
}

#[allow(dead_code)]
pub fn login_token(base_url: &str, email: &str, password: &str) -> Result<String> {
    let body: serde_json::Value = login(base_url, email, password)?
        .error_for_status()
        .context("login status")?
        .json()
        .context("parse login response")?;
    body.get("token")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .context("token missing")
}

#[allow(dead_code)]
pub fn register(
    base_url: &str,
    token: &str,
    body: serde_json::Value,
) -> Result<reqwest::blocking::Response> {
    reqwest::blocking::Client::new()
        .post(format!("{}/api/auth/register", base_url))
        .header(reqwest::header::AUTHORIZATION, auth_header(token))
        .json(&body)
        .send()
        .context("POST /api/auth/register")
}

#[allow(dead_code)]
pub fn message(resp: reqwest::blocking::Response) -> Result<String> {
    let body: serde_json::Value = resp.json().context("parse error body")?;
    body.get("message")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .context("message missing")
}
