//! Code catalog and auditor over HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;

use architect_console::auditor::{Auditor, FAILURE_ANSWER, GenerateError};
use architect_integration_tests::TestServer;

#[tokio::test]
async fn test_file_explorer() {
    let server = TestServer::spawn().await;
    server.sign_in("user@example.com").await;

    let (status, files) = server.get("/api/files").await;
    assert_eq!(status, StatusCode::OK);
    let paths: Vec<_> = files
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap().to_string())
        .collect();
    assert!(paths.contains(&"server.js".to_string()));
    assert!(paths.contains(&"schema.sql".to_string()));
    assert!(files[0].get("content").is_none());

    let (status, file) = server.get("/api/files/schema.sql").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(file["language"], "sql");
    assert!(file["html"].as_str().unwrap().contains("CREATE"));
}

#[tokio::test]
async fn test_audit_with_generator() {
    let generator = architect_integration_tests::ScriptedGenerator::new(vec![Ok(
        "The JWT secret falls back to a hardcoded value.".to_string(),
    )]);
    let server = TestServer::spawn_with(Auditor::new(generator.clone())).await;
    server.sign_in("user@example.com").await;

    let (status, body) = server
        .post(
            "/api/audit",
            json!({ "path": "middlewares/auth.js", "question": "Is the secret safe?" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], false);
    assert_eq!(body["answer"], "The JWT secret falls back to a hardcoded value.");

    let seen = generator.seen();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].prompt.contains("CODE TO AUDIT:\n```javascript\n"));
    assert!(seen[0].prompt.ends_with("USER QUESTION:\nIs the secret safe?\n"));

    let (_, panel) = server.get("/api/audit").await;
    assert_eq!(panel["last"]["path"], "middlewares/auth.js");
    assert_eq!(panel["pending"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_audit_transport_failure() {
    let generator =
        architect_integration_tests::ScriptedGenerator::new(vec![Err(GenerateError::RateLimited(30))]);
    let server = TestServer::spawn_with(Auditor::new(generator)).await;
    server.sign_in("admin@example.com").await;

    let (status, body) = server
        .post("/api/audit", json!({ "question": "Any SQL injection?" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], true);
    assert_eq!(body["answer"], FAILURE_ANSWER);
    assert!(
        server
            .notification_messages()
            .await
            .contains(&FAILURE_ANSWER.to_string())
    );
}
