//! Integration tests for the search pipeline
//!
//! These tests use wiremock to stand in for the search API and test the
//! full request, decode, render and write cycle end-to-end.

use search_digest::config::{load_credentials, SearchConfig};
use search_digest::{run_search, Credentials, SearchError, SearchPipeline, SearchRequest};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/customsearch/v1";

fn test_credentials() -> Credentials {
    Credentials {
        api_key: "test-key".to_string(),
        search_engine_id: "test-cx".to_string(),
    }
}

/// Creates a pipeline pointed at the mock server, writing into `output_dir`
fn create_pipeline(server: &MockServer, output_dir: &Path) -> SearchPipeline {
    let config = SearchConfig {
        endpoint: format!("{}{}", server.uri(), SEARCH_PATH),
        output_dir: output_dir.to_path_buf(),
        timeout: Duration::from_secs(5),
    };
    SearchPipeline::new(config).expect("Failed to create pipeline")
}

async fn mount_response(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn files_in(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn test_single_result_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "rust"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "kind": "customsearch#search",
                "items": [
                    {"link": "http://a", "htmlTitle": "<b>Rust</b>", "htmlSnippet": "systems lang"}
                ]
            }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("rust", &test_credentials()).unwrap();

    let written = pipeline.run(&request).await.expect("Search should succeed");

    assert_eq!(written, output.path().join("search-result_rust.html"));
    let content = std::fs::read_to_string(&written).unwrap();
    assert!(content.starts_with("Search results for '<b>rust</b>':<p/>"));
    assert!(content.contains("http://a"));
    assert!(content.contains("<b>Rust</b>"));
    assert!(content.contains("systems lang"));
    assert_eq!(content.matches("<p><a href=").count(), 1);
}

#[tokio::test]
async fn test_results_keep_response_order() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_string(
            r#"{"items": [
                {"link": "http://first", "htmlTitle": "One", "htmlSnippet": "1"},
                {"link": "http://second", "htmlTitle": "Two", "htmlSnippet": "2"},
                {"link": "http://third", "htmlTitle": "Three", "htmlSnippet": "3"}
            ]}"#,
        ),
    )
    .await;

    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("order", &test_credentials()).unwrap();

    let content = std::fs::read_to_string(pipeline.run(&request).await.unwrap()).unwrap();

    assert_eq!(content.matches("<p><a href=").count(), 3);
    let first = content.find("http://first").unwrap();
    let second = content.find("http://second").unwrap();
    let third = content.find("http://third").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn test_zero_results_writes_header_only() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(r#"{"kind": "customsearch#search", "searchInformation": {"totalResults": "0"}}"#),
    )
    .await;

    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("cats", &test_credentials()).unwrap();

    let written = pipeline.run(&request).await.expect("Zero results is not an error");

    assert_eq!(
        std::fs::read_to_string(written).unwrap(),
        "Search results for '<b>cats</b>':<p/>\n"
    );
}

#[tokio::test]
async fn test_missing_snippet_is_not_fatal() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_string(
            r#"{"items": [
                {"link": "http://no-snippet", "htmlTitle": "No snippet"},
                {"link": "http://full", "htmlTitle": "Full", "htmlSnippet": "here"}
            ]}"#,
        ),
    )
    .await;

    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("partial", &test_credentials()).unwrap();

    let content = std::fs::read_to_string(pipeline.run(&request).await.unwrap()).unwrap();

    assert_eq!(content.matches("<p><a href=").count(), 2);
    assert!(content.contains("<a href=\"http://no-snippet\">No snippet</a><br/><br/>"));
    assert!(content.contains("here"));
}

#[tokio::test]
async fn test_http_error_writes_no_file() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(403).set_body_string(r#"{"error": {"code": 403, "message": "forbidden"}}"#),
    )
    .await;

    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("rust", &test_credentials()).unwrap();

    let error = pipeline.run(&request).await.unwrap_err();

    match error {
        SearchError::Fetch(fetch) => {
            assert_eq!(fetch.status(), Some(403));
            assert!(!fetch.to_string().contains("test-key"));
        }
        other => panic!("Expected a fetch error, got {:?}", other),
    }
    assert!(files_in(output.path()).is_empty());
}

#[tokio::test]
async fn test_invalid_json_writes_no_file() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>definitely not json</html>"),
    )
    .await;

    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("rust", &test_credentials()).unwrap();

    let error = pipeline.run(&request).await.unwrap_err();

    assert!(matches!(error, SearchError::Parse(_)));
    assert!(files_in(output.path()).is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_fetch_error() {
    let output = TempDir::new().unwrap();
    let config = SearchConfig {
        endpoint: "http://127.0.0.1:1/customsearch/v1".to_string(),
        output_dir: output.path().to_path_buf(),
        timeout: Duration::from_secs(5),
    };
    let pipeline = SearchPipeline::new(config).unwrap();
    let request = SearchRequest::new("rust", &test_credentials()).unwrap();

    let error = pipeline.run(&request).await.unwrap_err();

    assert!(matches!(error, SearchError::Fetch(_)));
    assert!(files_in(output.path()).is_empty());
}

#[tokio::test]
async fn test_query_term_round_trips() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_string(r#"{"items": []}"#),
    )
    .await;

    let term = "C++ & Rust? 100% naïve";
    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new(term, &test_credentials()).unwrap();

    let written = pipeline.run(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let q = requests[0]
        .url
        .query_pairs()
        .find(|(name, _)| name == "q")
        .map(|(_, value)| value.into_owned());
    assert_eq!(q.as_deref(), Some(term));

    // File name and header use the term verbatim
    assert_eq!(written, output.path().join(format!("search-result_{}.html", term)));
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.starts_with(&format!("Search results for '<b>{}</b>':<p/>", term)));
}

#[tokio::test]
async fn test_term_with_path_separator_is_rejected_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items": []}"#))
        .expect(0)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("../escape", &test_credentials()).unwrap();

    let error = pipeline.run(&request).await.unwrap_err();

    assert!(matches!(error, SearchError::Write(_)));
    assert!(files_in(output.path()).is_empty());
}

#[tokio::test]
async fn test_credentials_file_drives_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("key", "file-key"))
        .and(query_param("cx", "file-cx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut credentials_file = NamedTempFile::new().unwrap();
    writeln!(credentials_file, "# search credentials").unwrap();
    writeln!(credentials_file, "key=file-key").unwrap();
    writeln!(credentials_file, "cx=file-cx").unwrap();
    credentials_file.flush().unwrap();

    let credentials = load_credentials(credentials_file.path()).unwrap();
    let output = TempDir::new().unwrap();
    let pipeline = create_pipeline(&server, output.path());
    let request = SearchRequest::new("from file", &credentials).unwrap();

    assert!(pipeline.run(&request).await.is_ok());
}

#[tokio::test]
async fn test_cli_writes_result_and_exits_zero() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_string(
            r#"{"items": [{"link": "http://a", "htmlTitle": "<b>Rust</b>", "htmlSnippet": "systems lang"}]}"#,
        ),
    )
    .await;

    let mut credentials_file = NamedTempFile::new().unwrap();
    writeln!(credentials_file, "key=cli-key\ncx=cli-cx").unwrap();
    credentials_file.flush().unwrap();
    let output = TempDir::new().unwrap();

    let result = tokio::process::Command::new(env!("CARGO_BIN_EXE_search-digest"))
        .arg("rust")
        .arg("--credentials")
        .arg(credentials_file.path())
        .arg("--output-dir")
        .arg(output.path())
        .arg("--endpoint")
        .arg(format!("{}{}", server.uri(), SEARCH_PATH))
        .output()
        .await
        .unwrap();

    assert!(result.status.success());
    let written = output.path().join("search-result_rust.html");
    assert_eq!(
        String::from_utf8_lossy(&result.stdout).trim(),
        written.display().to_string()
    );
    assert!(std::fs::read_to_string(written).unwrap().contains("systems lang"));
}

#[tokio::test]
async fn test_run_search_writes_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "rust"))
        .and(query_param("key", "run-key"))
        .and(query_param("cx", "run-cx"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"items": [{"link": "http://a", "htmlTitle": "<b>Rust</b>", "htmlSnippet": "systems lang"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = SearchConfig {
        endpoint: format!("{}{}", server.uri(), SEARCH_PATH),
        ..SearchConfig::with_output_dir(output.path())
    };

    let written = run_search("rust", "run-key", "run-cx", config)
        .await
        .expect("Search should succeed");

    assert_eq!(written, output.path().join("search-result_rust.html"));
    let content = std::fs::read_to_string(written).unwrap();
    assert!(content.starts_with("Search results for '<b>rust</b>':<p/>\n"));
    assert!(content.contains("<a href=\"http://a\"><b>Rust</b></a>"));
}

#[tokio::test]
async fn test_run_search_rejects_empty_term() {
    let output = TempDir::new().unwrap();

    let error = run_search("", "run-key", "run-cx", SearchConfig::with_output_dir(output.path()))
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::Argument(_)));
}

#[tokio::test]
async fn test_cli_accepts_term_starting_with_hyphen() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "-go"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut credentials_file = NamedTempFile::new().unwrap();
    writeln!(credentials_file, "key=cli-key\ncx=cli-cx").unwrap();
    credentials_file.flush().unwrap();
    let output = TempDir::new().unwrap();

    let result = tokio::process::Command::new(env!("CARGO_BIN_EXE_search-digest"))
        .arg("-go")
        .arg("--credentials")
        .arg(credentials_file.path())
        .arg("--output-dir")
        .arg(output.path())
        .arg("--endpoint")
        .arg(format!("{}{}", server.uri(), SEARCH_PATH))
        .output()
        .await
        .unwrap();

    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let written = output.path().join("search-result_-go.html");
    assert_eq!(
        std::fs::read_to_string(written).unwrap(),
        "Search results for '<b>-go</b>':<p/>\n"
    );
}

#[tokio::test]
async fn test_cli_reports_failure_once() {
    let output = TempDir::new().unwrap();

    let result = tokio::process::Command::new(env!("CARGO_BIN_EXE_search-digest"))
        .arg("rust")
        .arg("--credentials")
        .arg(output.path().join("absent.properties"))
        .output()
        .await
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert_eq!(stderr.matches("Failed to load credentials").count(), 1);
}

#[tokio::test]
async fn test_cli_rejects_wrong_argument_count() {
    let binary = env!("CARGO_BIN_EXE_search-digest");

    let none = tokio::process::Command::new(binary).output().await.unwrap();
    assert!(!none.status.success());
    assert!(!none.stderr.is_empty());

    let two = tokio::process::Command::new(binary)
        .args(["rust", "go"])
        .output()
        .await
        .unwrap();
    assert!(!two.status.success());
    assert!(!two.stderr.is_empty());
}

#[tokio::test]
async fn test_cli_missing_credentials_fails() {
    let output = TempDir::new().unwrap();

    let result = tokio::process::Command::new(env!("CARGO_BIN_EXE_search-digest"))
        .arg("rust")
        .arg("--credentials")
        .arg(output.path().join("absent.properties"))
        .arg("--output-dir")
        .arg(output.path())
        .output()
        .await
        .unwrap();

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("absent.properties"));
    assert!(files_in(output.path()).is_empty());
}
