//! CLI tests against a mock sandbox API.
//!
//! Each test runs the built binary with its own home directory, so stored
//! configuration never leaks between tests or from the developer's machine.

mod common;

use common::{
    TEST_KEY, json_lines, run_cli, run_cli_against, stderr_of_failure, stdout_of,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn entry(id: &str, completed: &str) -> serde_json::Value {
    json!({
        "id": id,
        "kind": "file",
        "filename": format!("{id}.exe"),
        "private": false,
        "submitted": completed,
        "completed": completed,
        "tasks": [{ "id": "behavioral1" }]
    })
}

async fn mount_search_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v0/search"))
        .and(query_param("offset", "2024-01-04T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [entry("day5", "2024-01-05T00:00:00Z"), entry("day3", "2024-01-03T00:00:00Z")],
            "next": "T2"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/search"))
        .and(query_param("offset", "T2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [entry("day1", "2024-01-01T00:00:00Z")],
            "next": "T1"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v0/search"))
        .and(query_param("offset", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(server)
        .await;
}

const WINDOW: [&str; 4] = [
    "--earliest",
    "2024-01-02T00:00:00Z",
    "--latest",
    "2024-01-04T00:00:00Z",
];

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_config_set_show_clear() {
    let home = tempfile::tempdir().unwrap();

    let output = run_cli(
        &["config", "set", "--api-key", "secret-key", "--environment", "private"],
        home.path(),
    )
    .await;
    let stdout = stdout_of(&output);
    let config_file = stdout
        .lines()
        .find_map(|line| line.strip_prefix("File: "))
        .map(std::path::PathBuf::from)
        .expect("config set prints the file path");
    assert!(config_file.starts_with(home.path()));

    let shown = stdout_of(&run_cli(&["config", "show"], home.path()).await);
    assert!(shown.contains("private"));
    assert!(shown.contains("https://private.tria.ge/api/v0/"));
    assert!(shown.contains("set"));
    assert!(!shown.contains("secret-key"));

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config_file).unwrap()).unwrap();
    assert_eq!(stored["api_key"], "secret-key");
    assert_eq!(stored["environment"], "private");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&config_file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    stdout_of(&run_cli(&["config", "clear"], home.path()).await);
    assert!(!config_file.exists());

    let shown = stdout_of(&run_cli(&["config", "show"], home.path()).await);
    assert!(shown.contains("public"));
    assert!(shown.contains("not set"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stored_key_is_used() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v0/samples/x/status"))
        .and(header("authorization", "Bearer stored-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "reported" })))
        .expect(1)
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    stdout_of(
        &run_cli(
            &["config", "set", "--api-key", "stored-key", "--api-url", &url],
            home.path(),
        )
        .await,
    );

    let stdout = stdout_of(&run_cli(&["status", "x"], home.path()).await);
    assert!(stdout.contains("reported"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_key_fails() {
    let home = tempfile::tempdir().unwrap();

    let stderr = stderr_of_failure(&run_cli(&["sample", "x"], home.path()).await);
    assert!(stderr.contains("No API key configured"));
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_search_exhaustive() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_search_pages(&server).await;

    let mut args = vec!["search", "--family", "emotet"];
    args.extend(WINDOW);
    let stdout = stdout_of(&run_cli_against(&args, home.path(), &server).await);

    let results = json_lines(&stdout);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], "day3");
    assert_eq!(results[0]["tasks"], json!(["behavioral1"]));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(
        requests
            .iter()
            .all(|r| r.url.query().unwrap_or("").contains("query=family%3Aemotet"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_early_exit() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_search_pages(&server).await;

    let mut args = vec!["search", "--family", "emotet", "--early-exit"];
    args.extend(WINDOW);
    let stdout = stdout_of(&run_cli_against(&args, home.path(), &server).await);

    let results = json_lines(&stdout);
    assert_eq!(results.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_future_window_makes_no_requests() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    let output = run_cli_against(
        &[
            "search",
            "--query",
            "tag:rat",
            "--earliest",
            "2999-01-01T00:00:00Z",
            "--latest",
            "2999-01-02T00:00:00Z",
        ],
        home.path(),
        &server,
    )
    .await;

    let stderr = stderr_of_failure(&output);
    assert!(stderr.contains("later than now"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_inverted_window() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    let output = run_cli_against(
        &[
            "search",
            "--query",
            "tag:rat",
            "--earliest",
            "2024-01-04",
            "--latest",
            "2024-01-02",
        ],
        home.path(),
        &server,
    )
    .await;

    let stderr = stderr_of_failure(&output);
    assert!(stderr.contains("Invalid time window"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_requires_query() {
    let home = tempfile::tempdir().unwrap();

    let output = run_cli(&["search", "--earliest", "2024-01-01"], home.path()).await;
    stderr_of_failure(&output);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_families() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    mount_search_pages(&server).await;

    Mock::given(method("GET"))
        .and(path("/v0/samples/day3/overview.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "analysis": { "family": ["qakbot"] },
            "targets": [{ "family": ["cobaltstrike", "qakbot"] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut args = vec!["search", "--query", "tag:banker", "--families"];
    args.extend(WINDOW);
    let stdout = stdout_of(&run_cli_against(&args, home.path(), &server).await);

    let families: Vec<String> = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(families, ["cobaltstrike", "qakbot"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_prints_next_offset() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v0/search"))
        .and(query_param("query", "tag:rat"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [entry("a", "2024-01-05T00:00:00Z")],
            "next": "2024-01-05T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli_against(
        &["page", "--query", "tag:rat", "--limit", "10"],
        home.path(),
        &server,
    )
    .await;

    let results = json_lines(&stdout_of(&output));
    assert_eq!(results[0]["id"], "a");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2024-01-05T00:00:00Z"));
}

// ============================================================================
// Samples and reports
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_sample_output() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v0/samples/240101-abc"))
        .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "240101-abc",
            "kind": "file",
            "filename": "invoice.doc",
            "status": "reported"
        })))
        .mount(&server)
        .await;

    let stdout = stdout_of(&run_cli_against(&["sample", "240101-abc"], home.path(), &server).await);

    let sample: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(sample["target"], "invoice.doc");
    assert_eq!(sample["completed"], "");
    assert_eq!(sample["tasks"], json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_reports_error() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v0/samples/nope/overview.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "NOT_FOUND",
            "message": "no such sample"
        })))
        .mount(&server)
        .await;

    let output = run_cli_against(&["overview", "nope"], home.path(), &server).await;
    let stderr = stderr_of_failure(&output);
    assert!(stderr.contains("Failed to get overview"));
    assert!(stderr.contains("404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_defaults_missing_fields() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v0/samples/x/behavioral1/report_triage.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task": { "id": "behavioral1" }
        })))
        .mount(&server)
        .await;

    let stdout =
        stdout_of(&run_cli_against(&["report", "x", "behavioral1"], home.path(), &server).await);

    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["version"], "");
    assert_eq!(report["analysis"]["score"], -1);
    assert_eq!(report["signatures"], json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_writes_file() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/v0/samples/x/behavioral1/dump.pcap"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xd4, 0xc3, 0xb2, 0xa1]))
        .mount(&server)
        .await;

    let target = home.path().join("capture.pcap");
    let target_str = target.to_str().unwrap();
    stdout_of(
        &run_cli_against(
            &[
                "download",
                "x",
                "--artifact",
                "pcap",
                "--task",
                "behavioral1",
                "-o",
                target_str,
            ],
            home.path(),
            &server,
        )
        .await,
    );

    assert_eq!(std::fs::read(&target).unwrap(), [0xd4, 0xc3, 0xb2, 0xa1]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_capture_needs_task() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    let output = run_cli_against(
        &["download", "x", "--artifact", "pcapng", "-o", "out.pcapng"],
        home.path(),
        &server,
    )
    .await;

    let stderr = stderr_of_failure(&output);
    assert!(stderr.contains("--task"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/v0/samples"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "240101-new",
            "status": "pending",
            "kind": "file",
            "filename": "a.exe"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = home.path().join("a.exe");
    std::fs::write(&file, b"MZ").unwrap();

    let output = run_cli_against(&["upload", file.to_str().unwrap()], home.path(), &server).await;
    let stdout = stdout_of(&output);

    let result: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(result["id"], "240101-new");
    assert!(String::from_utf8_lossy(&output.stderr).contains("240101-new"));
}
