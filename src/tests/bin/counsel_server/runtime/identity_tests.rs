use std::num::NonZeroU32;
use std::path::PathBuf;

use tempfile::tempdir;

use super::*;

fn args_with_data_dir(data_dir: PathBuf) -> Args {
    Args {
        addr: "127.0.0.1:0".parse().expect("parse socket addr"),
        addr_file: None,
        data_dir,
        jwt_secret: Some("identity-test-secret".to_string()),
        password_iterations: NonZeroU32::new(1_000).expect("non-zero"),
        lockout_threshold: 5,
        lockout_minutes: 30,
        bootstrap_email: None,
        bootstrap_password: None,
        bootstrap_name: "Gatete Colin".to_string(),
    }
}

#[test]
fn seed_creates_managing_partner_once() {
    let temp = tempdir().expect("create temp dir");
    let mut args = args_with_data_dir(temp.path().to_path_buf());
    args.bootstrap_email = Some("Colin@ColinAndColin.com".to_string());
    args.bootstrap_password = Some("first-password".to_string());

    let verifier = build_verifier(&args).expect("build verifier");
    seed_bootstrap_account(&args, &verifier).expect("seed");

    let seeded = verifier
        .store()
        .find_by_email("colin@colinandcolin.com")
        .expect("find")
        .expect("seeded account");
    assert_eq!(seeded.role, Role::ManagingPartner);
    assert_eq!(seeded.name, "Gatete Colin");

    // A restart with different bootstrap credentials leaves the store alone.
    args.bootstrap_email = Some("someone@else.com".to_string());
    let verifier = build_verifier(&args).expect("rebuild verifier");
    seed_bootstrap_account(&args, &verifier).expect("seed again");
    assert_eq!(verifier.store().list().expect("list").len(), 1);
    assert!(verifier
        .authenticate("colin@colinandcolin.com", "first-password")
        .is_ok());
}

#[test]
fn seed_without_credentials_is_a_no_op() {
    let temp = tempdir().expect("create temp dir");
    let args = args_with_data_dir(temp.path().to_path_buf());

    let verifier = build_verifier(&args).expect("build verifier");
    seed_bootstrap_account(&args, &verifier).expect("seed");
    assert!(verifier.store().list().expect("list").is_empty());
}

#[test]
fn seed_requires_email_and_password_together() {
    let temp = tempdir().expect("create temp dir");
    let mut args = args_with_data_dir(temp.path().to_path_buf());
    args.bootstrap_email = Some("colin@colinandcolin.com".to_string());

    let verifier = build_verifier(&args).expect("build verifier");
    assert!(seed_bootstrap_account(&args, &verifier).is_err());
}

#[test]
fn missing_secret_falls_back_to_ephemeral_signer() {
    let temp = tempdir().expect("create temp dir");
    let mut args = args_with_data_dir(temp.path().to_path_buf());
    args.jwt_secret = None;
    args.bootstrap_email = Some("mp@x.com".to_string());
    args.bootstrap_password = Some("pw".to_string());

    let first = build_verifier(&args).expect("build verifier");
    seed_bootstrap_account(&args, &first).expect("seed");
    let token = first.authenticate("mp@x.com", "pw").expect("login").token;
    assert!(first.verify_session(&token).is_ok());

    let restarted = build_verifier(&args).expect("rebuild verifier");
    assert!(restarted.verify_session(&token).is_err());
}
