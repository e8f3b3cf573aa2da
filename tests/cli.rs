mod common;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::process::Command;

fn api_check() -> Command {
    let mut cmd = Command::cargo_bin("rentease-api-check").expect("binary exists");
    cmd.env_remove("RENTEASE_API_URL")
        .env_remove("RENTEASE_TEST_PASSWORD")
        .env("NO_COLOR", "1");
    cmd
}

fn describe() -> Command {
    let mut cmd = Command::cargo_bin("rentease-describe").expect("binary exists");
    cmd.env_remove("EMERGENT_LLM_KEY")
        .env_remove("EMERGENT_LLM_BASE_URL")
        .env_remove("EMERGENT_LLM_MODEL");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    let text = String::from_utf8_lossy(&output.stdout);
    assert_eq!(text.lines().count(), 1, "expected one line, got {text:?}");
    serde_json::from_str(text.trim()).expect("stdout is JSON")
}

#[test]
fn describe_without_argument_reports_missing_prompt() {
    let output = describe().output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!({"success": false, "error": "No prompt data provided"})
    );
}

#[test]
fn describe_with_malformed_json_reports_parse_error() {
    for raw in ["{title: Loft}", "{\"title\": ", "not json"] {
        let output = describe()
            .env("EMERGENT_LLM_KEY", "sk-test")
            .arg(raw)
            .output()
            .unwrap();
        assert!(output.status.success());
        let value = stdout_json(&output);
        assert_eq!(value["success"], false);
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON: "));
    }
}

#[test]
fn describe_ignores_arguments_after_the_prompt() {
    let output = describe().arg("{}").arg("extra").output().unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["success"], false);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .contains("EMERGENT_LLM_KEY is not set"));
}

#[test]
fn describe_reports_bad_flags_as_json() {
    let output = describe()
        .arg("{}")
        .arg("--no-such-flag")
        .output()
        .unwrap();
    let value = stdout_json(&output);
    assert_eq!(value["success"], false);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid arguments: "));
}

#[test]
fn describe_refuses_to_run_without_api_key() {
    let output = describe().arg(r#"{"title":"Loft"}"#).output().unwrap();
    let value = stdout_json(&output);
    assert_eq!(value["success"], false);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .contains("EMERGENT_LLM_KEY is not set"));
}

#[test]
fn describe_prints_generated_description() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test")
            .body_contains("Title: Harbour Loft")
            .body_contains("Facilities: Basic amenities")
            .body_contains("professional real estate copywriter");
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content": "Wake up to harbour views."}}]
        }));
    });

    let output = describe()
        .env("EMERGENT_LLM_KEY", "sk-test")
        .env("EMERGENT_LLM_BASE_URL", server.url("/v1"))
        .arg(r#"{"title":"Harbour Loft","price":2100}"#)
        .output()
        .unwrap();

    assert_eq!(
        stdout_json(&output),
        json!({"success": true, "description": "Wake up to harbour views."})
    );
    mock.assert();
}

#[test]
fn describe_reads_key_from_env_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-from-file");
        then.status(200)
            .json_body(json!({"choices": [{"message": {"content": "ok"}}]}));
    });

    let env_file = temp.child("llm.env");
    env_file
        .write_str(&format!(
            "EMERGENT_LLM_KEY=sk-from-file\nEMERGENT_LLM_BASE_URL={}\n",
            server.url("/v1")
        ))
        .unwrap();

    let output = describe()
        .arg("{}")
        .arg("--env-file")
        .arg(env_file.path())
        .output()
        .unwrap();

    assert_eq!(stdout_json(&output)["description"], "ok");
    mock.assert();
}

#[test]
fn describe_reports_delegate_failures() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("upstream unavailable");
    });

    let output = describe()
        .env("EMERGENT_LLM_KEY", "sk-test")
        .env("EMERGENT_LLM_BASE_URL", server.url("/v1"))
        .arg("{}")
        .output()
        .unwrap();

    let value = stdout_json(&output);
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("503"));
}

#[test]
fn api_check_displays_help() {
    api_check()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Smoke-test the RentEase REST API"));
}

#[test]
fn api_check_passes_against_healthy_api() {
    let temp = assert_fs::TempDir::new().unwrap();
    let server = MockServer::start();
    common::mount_healthy_api(&server);

    api_check()
        .current_dir(temp.path())
        .arg("--base-url")
        .arg(server.base_url())
        .arg("--report")
        .arg("reports/run.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tests Run: 9"))
        .stdout(predicate::str::contains("ALL TESTS PASSED"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(temp.path().join("reports/run.json")).unwrap())
            .unwrap();
    assert_eq!(report["testsRun"], 9);
    assert_eq!(report["testsPassed"], 9);
}

#[test]
fn api_check_fails_on_wrong_health_message() {
    let temp = assert_fs::TempDir::new().unwrap();
    let server = MockServer::start();
    common::mount_api(&server, "Something else");

    api_check()
        .current_dir(temp.path())
        .env("RENTEASE_API_URL", server.base_url())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("SOME TESTS FAILED"))
        .stdout(predicate::str::contains(
            "Health Check Message Content: Wrong message content",
        ));
}

#[test]
fn api_check_uses_profile_from_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    let server = MockServer::start();
    common::mount_healthy_api(&server);

    temp.child("rentease.json")
        .write_str(&format!(
            r#"{{"defaultProfile": "mock", "profiles": {{"mock": {{"baseUrl": "{}", "timeoutSecs": 5}}}}}}"#,
            server.base_url()
        ))
        .unwrap();

    api_check()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(server.base_url()));
}

#[test]
fn api_check_rejects_unknown_profile() {
    let temp = assert_fs::TempDir::new().unwrap();
    api_check()
        .current_dir(temp.path())
        .arg("--profile")
        .arg("missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown profile: missing"));
}
