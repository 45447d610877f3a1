/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use tempfile::TempDir;

const LISTING: &str = "START LEVEL 1\r\n   ID   State         Level  Name\r\n\
[   0] [Active     ] [    0] org.apache.felix.framework (4.0.2)\r\n\
[  11] [Active     ] [    1] org.sakaiproject.nakamura.api (1.0.0)\r\n\
[  12] [Active     ] [    1] org.sakaiproject.nakamura.core (1.0.0)\r\n\
[  13] [Active     ] [    1] org.sakaiproject.nakamura.user (1.0.0)\r\n\
[  14] [Active     ] [   20] org.sakaiproject.nakamura.uxloader (1.0.0)\r\n";

fn requirements(id: &str) -> &'static str {
    match id {
        "12" => "org.sakaiproject.nakamura.core [12] imports:\r\n\
org.sakaiproject.nakamura.api.lite; version=\"1.0.0\" -> org.sakaiproject.nakamura.api [11]\r\n\
org.osgi.framework; version=\"1.5.0\" -> org.apache.felix.framework [0]\r\n",
        "13" => "org.sakaiproject.nakamura.user [13] imports:\r\n\
org.sakaiproject.nakamura.api.lite; version=\"1.0.0\" -> org.sakaiproject.nakamura.api [11]\r\n\
org.sakaiproject.nakamura.core.util; version=\"1.0.0\" -> org.sakaiproject.nakamura.core [12]\r\n",
        _ => "",
    }
}

/// Serves one scripted Felix remote shell session on a random port
fn spawn_fake_shell() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut writer = stream.try_clone().unwrap();
        writer.write_all(b"\r\nFelix Remote Shell Console:\r\n============================\r\n\r\n-> ").unwrap();

        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else { break };
            let command = line.trim();
            let response = if command == "ps -s" {
                LISTING.to_string()
            } else if let Some(id) = command.strip_prefix("inspect package requirement ") {
                requirements(id).to_string()
            } else if command == "exit" {
                break;
            } else {
                format!("Command not found: {}\r\n", command)
            };
            if writer.write_all(format!("{}-> ", response).as_bytes()).is_err() {
                break;
            }
        }
    });

    port
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("bundle-graph")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--exclude-suffix"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("bundle-graph").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("bundle-graph")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Unknown data source
    #[test]
    fn test_exit_code_invalid_source() {
        cargo_bin_cmd!("bundle-graph")
            .args(["--source", "ftp"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Zero concurrency
    #[test]
    fn test_exit_code_zero_concurrency() {
        cargo_bin_cmd!("bundle-graph")
            .args(["--concurrency", "0"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Nothing listens on the shell port
    #[test]
    fn test_exit_code_unreachable_shell() {
        let temp_dir = TempDir::new().unwrap();
        cargo_bin_cmd!("bundle-graph")
            .current_dir(temp_dir.path())
            .args([
                "--source", "telnet", "--host", "127.0.0.1", "--port", "1", "--attempts", "1",
                "--timeout", "2",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("connect to shell at 127.0.0.1:1"));
    }

    /// Exit code 3: Nothing listens on the console port
    #[test]
    fn test_exit_code_unreachable_console() {
        let temp_dir = TempDir::new().unwrap();
        cargo_bin_cmd!("bundle-graph")
            .current_dir(temp_dir.path())
            .args([
                "--host",
                "http://127.0.0.1:1",
                "--attempts",
                "1",
                "--timeout",
                "2",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("An error occurred"));
    }
}

#[test]
fn test_e2e_telnet_run_writes_dot_files_and_stats() {
    let port = spawn_fake_shell();
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("bundle-graph")
        .current_dir(temp_dir.path())
        .args([
            "--source",
            "telnet",
            "--host",
            "127.0.0.1",
            "--port",
            &port.to_string(),
            "--format",
            "dot",
            "--root-name",
            "nakamura",
            "--timeout",
            "5",
        ])
        .assert()
        .code(0);

    let out = temp_dir.path().join("graphviz");
    for file in [
        "nakamura.dot",
        "org.sakaiproject.nakamura.core.dot",
        "org.sakaiproject.nakamura.core-pred.dot",
        "org.sakaiproject.nakamura.user.dot",
        "org.sakaiproject.nakamura.api-pred.dot",
        "stats.log",
    ] {
        assert!(out.join(file).exists(), "missing {}", file);
    }
    assert!(!out.join("org.sakaiproject.nakamura.api.dot").exists());
    assert!(!out.join("org.sakaiproject.nakamura.uxloader.dot").exists());

    let stats = fs::read_to_string(out.join("stats.log")).unwrap();
    let lines: Vec<&str> = stats.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[1].starts_with("Bundle"));
    assert!(lines[3].starts_with("org.sakaiproject.nakamura.api "));
    assert!(lines[3].ends_with(" 0            2"));
    assert!(lines[4].ends_with(" 1            1"));
    assert!(lines[5].ends_with(" 2            0"));
}
