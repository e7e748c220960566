#![allow(deprecated)]

use assert_cmd::Command;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use tempfile::TempDir;

/// Run `router` on a background runtime and return its base URL
fn mock_api(router: Router) -> String {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });
    format!("http://{}", rx.recv().unwrap())
}

fn logged_in(root: &Path) {
    fs::create_dir_all(root.join("default")).unwrap();
    fs::write(root.join("default").join("settings.toml"), "token = \"test-token\"\n").unwrap();
}

fn azion(root: &Path, api: &str) -> Command {
    let mut cmd = Command::cargo_bin("azion").unwrap();
    cmd.current_dir(root)
        .env_remove("AZION_TOKEN")
        .env_remove("RUST_LOG")
        .env("AZION_API_URL", api)
        .env("AZION_API_V4_URL", format!("{}/v4", api))
        .arg("-c")
        .arg(root);
    cmd
}

#[test]
fn create_domain_prints_the_new_id() {
    let api = mock_api(Router::new().route(
        "/domains",
        post(|| async { (StatusCode::CREATED, Json(json!({"id": 1673635841}))) }),
    ));
    let temp = TempDir::new().unwrap();
    logged_in(temp.path());

    azion(temp.path(), &api)
        .args([
            "create",
            "domain",
            "--name",
            "foo",
            "--application-id",
            "42",
            "--cname-access-only",
            "false",
            "--active",
            "true",
        ])
        .assert()
        .success()
        .stdout("Created domain with ID 1673635841\n");
}

#[test]
fn delete_missing_personal_token_fails() {
    let api = mock_api(Router::new().route(
        "/iam/personal_tokens/{uuid}",
        delete(|| async { StatusCode::NOT_FOUND }),
    ));
    let temp = TempDir::new().unwrap();
    logged_in(temp.path());

    azion(temp.path(), &api)
        .args(["delete", "personal-token", "--id", "5c9f6a2e-0000-4000-8000-000000000000"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Failed to delete the personal token:"));
}

#[test]
fn missing_request_file_fails_before_any_request() {
    let temp = TempDir::new().unwrap();
    logged_in(temp.path());

    // nothing listens here, so a request would surface as a transport error instead
    azion(temp.path(), "http://127.0.0.1:9")
        .args(["create", "application", "--file", "does-not-exist.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to unmarshal the given file"));
}

#[test]
fn structured_output_goes_to_a_file() {
    let api = mock_api(Router::new().route(
        "/v4/workspace/workloads/{id}",
        get(|| async { Json(json!({"data": {"id": 8, "name": "site", "active": true}})) }),
    ));
    let temp = TempDir::new().unwrap();
    logged_in(temp.path());
    let out = temp.path().join("workload.json");

    azion(temp.path(), &api)
        .args(["describe", "workload", "--workload-id", "8", "--format", "json", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("File successfully written to:"));

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["name"], "site");
}

#[test]
fn token_flag_is_validated_and_saved() {
    let api = mock_api(Router::new().route(
        "/user/me",
        get(|| async { Json(json!({"results": {"email": "dev@example.com", "client_id": 77}})) }),
    ));
    let temp = TempDir::new().unwrap();

    azion(temp.path(), &api)
        .args(["--token", "fresh-token"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Token saved in"));

    let settings = fs::read_to_string(temp.path().join("default").join("settings.toml")).unwrap();
    assert!(settings.contains("fresh-token"));
    assert!(settings.contains("dev@example.com"));
}

#[test]
fn commands_without_a_token_ask_for_login() {
    let temp = TempDir::new().unwrap();

    azion(temp.path(), "http://127.0.0.1:9")
        .args(["list", "domain"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Token not found"));
}
