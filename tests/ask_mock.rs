use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/Qwen/Qwen3-4B-Instruct-2507";

fn mock_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "error": null,
        "output": {
            "role": "assistant",
            "content": text
        }
    })
}

fn medx_cmd(server_uri: &str, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("medx").unwrap();
    cmd.env("MEDX_HOME", home.path())
        .env("BYTEZ_API_KEY", "test-api-key")
        .env("BYTEZ_BASE_URL", server_uri);
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_prints_formatted_reply() {
    let mock_server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_response(
            "Malaria needs prompt treatment.\n- see a doctor",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Piped output: emphasis tags are stripped but canonical casing applies
    medx_cmd(&mock_server.uri(), &home)
        .args(["ask", "is malaria serious?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Malaria needs prompt Treatment."))
        .stdout(predicate::str::contains("- see a doctor"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_trims_reply_whitespace() {
    let mock_server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_response("  Take rest.  ")))
        .mount(&mock_server)
        .await;

    medx_cmd(&mock_server.uri(), &home)
        .args(["ask", "--raw", "what should I do?"])
        .assert()
        .success()
        .stdout(predicate::eq("Take rest.\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_model_override_changes_endpoint() {
    let mock_server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/org/other-model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_response("Ok.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    medx_cmd(&mock_server.uri(), &home)
        .args(["ask", "--model", "org/other-model", "hello?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Ok."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_fails_on_http_error() {
    let mock_server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    medx_cmd(&mock_server.uri(), &home)
        .args(["ask", "hello?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_rejects_empty_prompt() {
    let mock_server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    medx_cmd(&mock_server.uri(), &home)
        .args(["ask", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No prompt provided"));
}
