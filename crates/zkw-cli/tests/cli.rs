//! End-to-end runs of the `zkw` binary: key storage and input validation.

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::tempdir;

const KEY: &str = "50000000000000000000000000000000000000000000000000000000000000000000000000000";

fn s(path: &Path) -> &str {
    path.to_str().expect("path is valid UTF-8")
}

fn zkw() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("zkw");
    cmd.env("RUST_LOG", "info").env("NO_COLOR", "1");
    for var in ["ZKW_KEY_STORE", "ZKW_KEY_FILE", "ZKW_KEY_STDIN"] {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

#[test]
fn import_from_stdin_then_status_then_clear() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("key.txt");

    zkw()
        .args(["key", "import", "--key-stdin", "--store", s(&store)])
        .write_stdin(format!("{KEY}\n"))
        .assert()
        .success();
    let stored = std::fs::read_to_string(&store).expect("key file written");
    assert_eq!(stored.trim(), KEY);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        let mode = std::fs::metadata(&store).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    let status = zkw()
        .args(["key", "status", "--store", s(&store)])
        .assert()
        .success();
    assert!(stdout(&status).contains("Private key present"));

    zkw()
        .args(["key", "clear", "--store", s(&store)])
        .assert()
        .success();
    assert!(!store.exists());

    let status = zkw()
        .args(["key", "status", "--store", s(&store)])
        .assert()
        .success();
    assert!(stdout(&status).contains("No private key stored"));
}

#[test]
fn import_from_file_accepts_hex() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("key.txt");
    let input = dir.path().join("input.txt");
    // 2^127
    std::fs::write(&input, "0x80000000000000000000000000000000\n").expect("write input");

    zkw()
        .args(["key", "import", "--key-file", s(&input), "--store", s(&store)])
        .assert()
        .success();

    let stored = std::fs::read_to_string(&store).expect("key file written");
    assert_eq!(stored.trim(), "170141183460469231731687303715884105728");
}

#[test]
fn invalid_key_is_not_stored() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("key.txt");

    let out = zkw()
        .args(["key", "import", "--key-stdin", "--store", s(&store)])
        .write_stdin("12345")
        .assert()
        .failure()
        .code(1);
    assert!(stdout(&out).contains("too short"));
    assert!(!store.exists());
}

#[test]
fn clearing_an_empty_store_succeeds() {
    let dir = tempdir().expect("tempdir");
    zkw()
        .args(["key", "clear", "--store", s(&dir.path().join("missing.txt"))])
        .assert()
        .success();
}

#[test]
fn validate_address_accepts_both_prefix_forms() {
    for address in [
        "0000000000000000000000000000000000000abc",
        "0x0000000000000000000000000000000000000ABC",
    ] {
        let out = zkw()
            .args(["validate", "address", address])
            .assert()
            .success();
        assert!(stdout(&out).contains("Valid recipient address"));
    }
}

#[test]
fn validate_address_rejects_wrong_length() {
    let out = zkw()
        .args(["validate", "address", "0x1234"])
        .assert()
        .failure()
        .code(1);
    assert!(stdout(&out).contains("40 hex characters"));
}

#[test]
fn validate_amount_reports_base_units() {
    let out = zkw()
        .args(["validate", "amount", "0.01"])
        .assert()
        .success();
    assert!(stdout(&out).contains("10000000000000000"));
}

#[test]
fn validate_amount_rejects_excess_precision() {
    let out = zkw()
        .args(["validate", "amount", "0.0000000000000000001"])
        .assert()
        .failure()
        .code(1);
    assert!(stdout(&out).contains("18 decimal places"));
}

#[test]
fn validate_key_does_not_write_anything() {
    let dir = tempdir().expect("tempdir");
    let out = zkw()
        .current_dir(dir.path())
        .args(["validate", "key", "--key-stdin"])
        .write_stdin(KEY)
        .assert()
        .success();
    assert!(stdout(&out).contains("Valid private key"));
    assert_eq!(
        std::fs::read_dir(dir.path()).expect("read dir").count(),
        0
    );
}
