//! Error scenario integration tests

use std::net::TcpListener;
use std::time::Duration;

use predicates::prelude::*;

fn isolated(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("voice-forward").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .timeout(Duration::from_secs(20));
    cmd
}

#[test]
fn malformed_destination_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir).arg("no-port-here").output().unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid destination"),
        "Expected error about destination, got: {}",
        stderr
    );
}

#[test]
fn out_of_range_port_is_usage_error() {
    for destination in ["host:0", "host:65536", "host:http"] {
        let dir = tempfile::tempdir().unwrap();
        let output = isolated(&dir).arg(destination).output().unwrap();

        assert_eq!(output.status.code(), Some(2), "destination {}", destination);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid port"), "got: {}", stderr);
    }
}

#[test]
fn invalid_connect_timeout_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir)
        .args(["127.0.0.1:9", "--connect-timeout", "soon"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid connect-timeout"), "got: {}", stderr);
}

#[test]
fn refused_connection_fails() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();

    let output = isolated(&dir)
        .arg(format!("127.0.0.1:{}", port))
        .write_stdin("")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("refused"), "got: {}", stderr);
    assert!(!dir.path().join("voice-forward").join("config.toml").exists());
}

#[test]
fn sending_without_destination_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    isolated(&dir)
        .write_stdin("hello\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("You must set a destination server."));
}

#[test]
fn config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated(&dir)
        .args(["config", "get", "unknown_key"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown key"), "got: {}", stderr);
}

#[test]
fn config_set_rejects_invalid_values() {
    for (key, value) in [
        ("hostPort", "nohost"),
        ("connect_timeout", "forever"),
        ("history_size", "many"),
        ("notify", "sometimes"),
    ] {
        let dir = tempfile::tempdir().unwrap();
        let output = isolated(&dir)
            .args(["config", "set", key, value])
            .output()
            .unwrap();

        assert!(!output.status.success(), "{} = {} accepted", key, value);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(key), "got: {}", stderr);
    }
}
