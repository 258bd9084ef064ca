//! CLI integration tests
//!
//! Tests the jcli-bridge CLI using assert_cmd.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;

use assert_cmd::Command;
use predicates::prelude::*;

const ENV_VARS: [&str; 6] = [
    "JASMIN_HOST",
    "JASMIN_PORT",
    "JASMIN_USERNAME",
    "JASMIN_PASSWORD",
    "JASMIN_TIMEOUT_MS",
    "JCLI_BRIDGE_CONFIG",
];

fn jcli_bridge() -> Command {
    let mut cmd = Command::cargo_bin("jcli-bridge")
        .expect("Failed to locate jcli-bridge binary - ensure it's built before running tests");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Write a config file pointing at `port` on loopback
fn write_config(dir: &Path, port: u16) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        format!(
            "[console]\nhost = \"127.0.0.1\"\nport = {}\npassword = \"topsecret\"\ntimeout_ms = 3000\n",
            port
        ),
    )
    .unwrap();
    path
}

/// Serve one jcli login and answer the command with `output`.
/// Returns the command line the client sent.
fn spawn_console(output: &'static str) -> (u16, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut writer = stream;
        let mut read_line = || {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            line.trim_end().to_string()
        };

        writer.write_all(b"Username: ").unwrap();
        read_line();
        writer.write_all(b"Password: ").unwrap();
        read_line();
        writer
            .write_all(b"Welcome to Jasmin console\r\nSession ref: 1\r\njcli : ")
            .unwrap();
        let command = read_line();
        writer
            .write_all(format!("{}\r\n{}\r\njcli : ", command, output).as_bytes())
            .unwrap();
        command
    });

    (port, handle)
}

fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn test_cli_help() {
    jcli_bridge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("jcli-bridge"))
        .stdout(predicate::str::contains("Jasmin jcli console"));
}

#[test]
fn test_cli_version() {
    jcli_bridge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jcli-bridge"));
}

#[test]
fn test_cli_exec_help() {
    jcli_bridge()
        .args(["exec", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--timeout-ms"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_cli_exec_requires_command() {
    jcli_bridge().arg("exec").assert().failure();
}

#[test]
fn test_cli_exec_prints_console_output() {
    let dir = tempfile::tempdir().unwrap();
    let (port, console) = spawn_console("#User id\r\nuser1 users enabled");
    let config = write_config(dir.path(), port);

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .args(["exec", "user", "-l"])
        .assert()
        .success()
        .stdout("#User id\nuser1 users enabled\n");

    assert_eq!(console.join().unwrap(), "user -l");
}

#[test]
fn test_cli_exec_json() {
    let dir = tempfile::tempdir().unwrap();
    let (port, console) = spawn_console("Total routes: 0");
    let config = write_config(dir.path(), port);

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .args(["exec", "--json", "mtrouter", "-l"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"result":"Total routes: 0"}"#));

    assert_eq!(console.join().unwrap(), "mtrouter -l");
}

#[test]
fn test_cli_exec_reads_command_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let (port, console) = spawn_console("Total filters: 0");
    let config = write_config(dir.path(), port);

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .args(["exec", "-"])
        .write_stdin("filter -l\n")
        .assert()
        .success()
        .stdout("Total filters: 0\n");

    assert_eq!(console.join().unwrap(), "filter -l");
}

#[test]
fn test_cli_exec_port_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let (port, console) = spawn_console("Total groups: 0");
    let config = write_config(dir.path(), unused_port());

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .args(["exec", "--port", &port.to_string(), "group", "-l"])
        .assert()
        .success()
        .stdout("Total groups: 0\n");

    console.join().unwrap();
}

#[test]
fn test_cli_exec_connection_refused() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), unused_port());

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .args(["exec", "user", "-l"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to execute command"))
        .stderr(predicate::function(|err: &str| {
            err.matches("Failed to execute command").count() == 1
        }))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_cli_exec_connection_refused_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), unused_port());

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .args(["exec", "--json", "user", "-l"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""kind":"ConnectionError""#))
        .stdout(predicate::str::contains("Failed to execute command"))
        .stderr(predicate::str::contains("Failed to execute command").not());
}

#[test]
fn test_cli_exec_invalid_env_port() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), unused_port());

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .env("JASMIN_PORT", "not-a-port")
        .args(["exec", "user", "-l"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JASMIN_PORT"));
}

#[test]
fn test_cli_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");

    jcli_bridge()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_cli_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    jcli_bridge()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    // Refuses to overwrite without --force
    jcli_bridge()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    jcli_bridge()
        .arg("--config")
        .arg(&path)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    jcli_bridge()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port = 8990"))
        .stdout(predicate::str::contains("ready_prompt = \"jcli :\""))
        .stdout(predicate::str::contains("jclipwd").not());
}

#[test]
fn test_cli_quiet_suppresses_status_messages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    jcli_bridge()
        .arg("--config")
        .arg(&path)
        .args(["-q", "config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    // Errors are still shown
    jcli_bridge()
        .arg("--config")
        .arg(&path)
        .args(["-q", "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_cli_config_show_applies_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), 8990);

    jcli_bridge()
        .arg("--config")
        .arg(&config)
        .env("JASMIN_HOST", "gateway.example")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("host = \"gateway.example\""))
        .stdout(predicate::str::contains("topsecret").not());
}
