use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

const SHA256_OF_A: &str = "559aead08264d5795d3909718cdd05abd49572e84fe55590eef31a88a08fdffd";

fn biocredit() -> Command {
    let mut cmd = Command::cargo_bin("biocredit").unwrap();
    cmd.env_remove("BIOCREDIT_CONFIG")
        .env_remove("BIOCREDIT_DIGEST")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn status_reports_empty_population() {
    biocredit()
        .args(["status", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"registered_count\": 0"))
        .stdout(predicate::str::contains("\"transaction_fee\": 0"));
}

#[test]
fn register_prints_token_and_grant() {
    biocredit()
        .args(["--output", "json", "register", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains(SHA256_OF_A))
        .stdout(predicate::str::contains("3155760000"));
}

#[test]
fn register_many_emits_one_json_document() {
    let output = biocredit()
        .args(["--output", "json", "register", "A", "B"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let registrations: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let registrations = registrations.as_array().unwrap();
    assert_eq!(registrations.len(), 2);
    assert_eq!(registrations[0]["token"], SHA256_OF_A);
    assert_eq!(registrations[1]["balance"], 3_155_760_000u64);
}

#[test]
fn duplicate_registration_exits_non_zero() {
    biocredit()
        .args(["register", "A", "A"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains(SHA256_OF_A))
        .stderr(predicate::str::contains("duplicate identity"));
}

#[test]
fn transfer_from_ghost_is_unknown_identity() {
    biocredit()
        .args(["transfer", "ghost", SHA256_OF_A, "10"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown identity: ghost"));
}

#[test]
fn negative_amount_between_registered_identities_is_invalid() {
    biocredit()
        .args(["shell", "--output", "json"])
        .write_stdin("register A B\ntransfer @A @B -5\ntransfer @A @B 18446744073709551616\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid amount: -5"))
        .stderr(predicate::str::contains("invalid amount: 18446744073709551616"))
        .stderr(predicate::str::contains("2 of 3 shell commands were rejected"));
}

#[test]
fn unknown_identity_outranks_bad_amount() {
    biocredit()
        .args(["transfer", "ghost", "other-ghost", "-5"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown identity: ghost"));

    biocredit()
        .args(["shell"])
        .write_stdin("register A\ntransfer @A ghost -1\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown identity: ghost"))
        .stderr(predicate::str::contains("invalid amount").not());
}

#[test]
fn demo_runs_first_transaction() {
    biocredit()
        .args(["demo", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 900"))
        .stdout(predicate::str::contains("\"registered_count\": 2"));
}

#[test]
fn shell_runs_scenario_on_one_ledger() {
    let script = "\
register A
register B
transfer @A @B 900 \"first meal\"
balance @A
balance @B
transfer @A @B 3155759101
";
    biocredit()
        .args(["shell", "--output", "json"])
        .write_stdin(script)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"balance\": 3155759100"))
        .stdout(predicate::str::contains("\"balance\": 3155760900"))
        .stdout(predicate::str::contains("first meal"))
        .stderr(predicate::str::contains("insufficient balance"))
        .stderr(predicate::str::contains("1 of 6 shell commands were rejected"));
}

#[test]
fn shell_without_rejections_succeeds() {
    biocredit()
        .arg("shell")
        .write_stdin("register A\nregister B\ntransfer @A @B 1\nhistory @B\nstatus\n")
        .assert()
        .success();
}

#[test]
fn config_file_selects_digest() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "output = \"json\"\n\n[registrar]\ndigest = \"blake3\"").unwrap();

    biocredit()
        .arg("--config")
        .arg(file.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"identity_scheme\": \"blake3\""));
}

#[test]
fn digest_flag_overrides_environment() {
    biocredit()
        .env("BIOCREDIT_DIGEST", "blake3")
        .args(["status", "--output", "yaml", "--digest", "sha256"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identity_scheme: sha256"));
}
