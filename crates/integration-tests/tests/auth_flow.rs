//! Sign-in, registration and password recovery over HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::json;

use architect_integration_tests::{PASSWORD, TestServer};

#[tokio::test]
async fn test_health() {
    let server = TestServer::spawn().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_admin_sign_in_and_out() {
    let server = TestServer::spawn().await;

    let body = server.sign_in("admin@example.com").await;
    assert_eq!(body["account"]["role"], "admin");
    assert_eq!(body["view"], "dashboard");

    let (_, state) = server.get("/api/state").await;
    assert_eq!(state["session"]["is_authenticated"], true);
    assert_eq!(state["session"]["loading"], false);
    assert!(state["session"].get("token").is_none());
    assert_eq!(
        server.notification_messages().await,
        ["Authenticated as admin"]
    );

    let (status, _) = server.post("/api/auth/logout", json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, state) = server.get("/api/state").await;
    assert_eq!(state["view"], "login");
    assert_eq!(state["session"]["account"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_bad_credentials() {
    let server = TestServer::spawn().await;

    for (email, password) in [
        ("nobody@example.com", PASSWORD),
        ("user@example.com", "short"),
    ] {
        let (status, body) = server
            .post(
                "/api/auth/login",
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials.");
    }

    let (_, state) = server.get("/api/state").await;
    assert_eq!(state["session"]["is_authenticated"], false);
    assert_eq!(state["session"]["loading"], false);
}

#[tokio::test]
async fn test_registration_then_sign_in() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post(
            "/api/auth/register",
            json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["account"]["id"], 3);
    assert_eq!(body["account"]["role"], "user");
    assert_eq!(body["view"], "login");

    let (_, mail) = server.get("/api/mail").await;
    assert_eq!(mail[0]["kind"], "welcome");
    assert_eq!(mail[0]["recipient"], "ada@example.com");
    assert!(mail[0]["body"].as_str().unwrap().contains("Hi ada,"));

    let body = server.sign_in("ada@example.com").await;
    assert_eq!(body["account"]["name"], "Ada");

    let (status, body) = server
        .post(
            "/api/auth/register",
            json!({ "name": "Bob", "email": "bob@example.com", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "You are already signed in.");
    let (_, state) = server.get("/api/state").await;
    assert_eq!(state["view"], "dashboard");

    server.post("/api/auth/logout", json!({})).await;
    let (status, body) = server
        .post(
            "/api/auth/register",
            json!({ "name": "Ada", "email": "ada@example.com", "password": "again" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists.");
}

#[tokio::test]
async fn test_registration_validation() {
    let server = TestServer::spawn().await;

    let cases = [
        (json!({ "name": " ", "email": "x@example.com", "password": "pw" }), "Name cannot be empty."),
        (json!({ "name": "X", "email": "x@example.com", "password": "" }), "Password cannot be empty."),
    ];
    for (body, message) in cases {
        let (status, response) = server.post("/api/auth/register", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], message);
    }

    let (status, _) = server
        .post(
            "/api/auth/register",
            json!({ "name": "X", "email": "not-an-email", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, mail) = server.get("/api/mail").await;
    assert_eq!(mail, json!([]));
}

#[tokio::test]
async fn test_password_recovery_round_trip() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post(
            "/api/auth/forgot-password",
            json!({ "email": "nobody@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No user found with that email.");

    let (status, _) = server
        .post(
            "/api/auth/forgot-password",
            json!({ "email": "user@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, mail) = server.get("/api/mail").await;
    assert_eq!(mail[0]["subject"], "Password Reset Request");
    let id = mail[0]["id"].as_str().unwrap().to_string();

    let (status, body) = server.post(&format!("/api/mail/{id}/open"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "reset_password");

    let (status, body) = server
        .post("/api/auth/reset-password", json!({ "password": "anything" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "login");
    assert!(
        server
            .notification_messages()
            .await
            .contains(&"Password updated!".to_string())
    );
}
