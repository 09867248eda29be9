//! Helpers for running the built binary in an isolated home directory.

#![allow(dead_code)]

use std::path::Path;
use std::process::Output;

use tokio::process::Command;
use wiremock::MockServer;

pub const TEST_KEY: &str = "cli-test-key";

/// Base URL of a mock server, as the CLI expects it.
pub fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/v0/", server.address().port())
}

fn command(args: &[&str], home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_triage"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("TRIAGE_API_KEY");
    cmd.env_remove("TRIAGE_API_URL");
    cmd.env_remove("TRIAGE_ENVIRONMENT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the CLI with only the stored configuration.
pub async fn run_cli(args: &[&str], home: &Path) -> Output {
    command(args, home)
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI against a mock server, passing the key through the environment.
pub async fn run_cli_against(args: &[&str], home: &Path, server: &MockServer) -> Output {
    command(args, home)
        .env("TRIAGE_API_URL", api_url(server))
        .env("TRIAGE_API_KEY", TEST_KEY)
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Assert success and return stdout.
pub fn stdout_of(output: &Output) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed\nstderr: {}", stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Assert failure and return stderr.
pub fn stderr_of_failure(output: &Output) -> String {
    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("CLI command should have failed\nstdout: {}", stdout);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parse JSON lines from stdout.
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}
