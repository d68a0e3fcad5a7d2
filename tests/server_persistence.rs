mod common;

use anyhow::{Context, Result};

#[test]
fn accounts_lockout_and_sessions_survive_restart() -> Result<()> {
    let data_dir = tempfile::tempdir().context("create temp data dir")?;

    let token = {
        let server = common::spawn_server_in(data_dir.path(), &[])?;
        let mp = common::login_token(&server.base_url, common::MP_EMAIL, common::MP_PASSWORD)?;
        common::register(
            &server.base_url,
            &mp,
            serde_json::json!({
                "name": "Mushimiyimana Janviere",
                "email": "janviere@colinandcolin.com",
                "password": "assistant-password",
                "role": "executive_assistant",
            }),
        )?
        .error_for_status()
        .context("register assistant")?;

        for _ in 0..5 {
            common::login(&server.base_url, "janviere@colinandcolin.com", "wrong")?;
        }
        mp
    };

    let server = common::spawn_server_in(data_dir.path(), &[])?;

    // Same secret, so the session issued before the restart is still valid.
    let me = reqwest::blocking::Client::new()
        .get(format!("{}/api/auth/me", server.base_url))
        .header(reqwest::header::AUTHORIZATION, common::auth_header(&token))
        .send()
        .context("GET /api/auth/me after restart")?;
    assert!(me.status().is_success());

    let locked = common::login(
        &server.base_url,
        "janviere@colinandcolin.com",
        "assistant-password",
    )?;
    assert_eq!(locked.status(), reqwest::StatusCode::FORBIDDEN);

    Ok(())
}

#[test]
fn custom_lockout_threshold_is_honoured() -> Result<()> {
    let data_dir = tempfile::tempdir().context("create temp data dir")?;
    let server = common::spawn_server_in(data_dir.path(), &["--lockout-threshold", "2"])?;

    for _ in 0..2 {
        let resp = common::login(&server.base_url, common::MP_EMAIL, "wrong")?;
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    }
    let locked = common::login(&server.base_url, common::MP_EMAIL, common::MP_PASSWORD)?;
    assert_eq!(locked.status(), reqwest::StatusCode::FORBIDDEN);

    Ok(())
}

#[test]
fn storage_failure_during_register_is_an_opaque_500() -> Result<()> {
    let data_dir = tempfile::tempdir().context("create temp data dir")?;
    let server = common::spawn_server_in(data_dir.path(), &[])?;
    let mp = common::login_token(&server.base_url, common::MP_EMAIL, common::MP_PASSWORD)?;

    let accounts = data_dir.path().join("accounts.json");
    std::fs::remove_file(&accounts).context("remove accounts.json")?;
    std::fs::create_dir(&accounts).context("block accounts.json")?;

    let resp = common::register(
        &server.base_url,
        &mp,
        serde_json::json!({
            "name": "Uwase Linda",
            "email": "linda@colinandcolin.com",
            "password": "associate-password",
            "role": "associate",
        }),
    )?;
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(common::message(resp)?, "Server error.");

    let retry = common::login(&server.base_url, "linda@colinandcolin.com", "associate-password")?;
    assert_eq!(retry.status(), reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}
