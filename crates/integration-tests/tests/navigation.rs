//! Screen access and the sidebar over HTTP.

use reqwest::StatusCode;
use serde_json::json;

use architect_integration_tests::TestServer;

fn section_titles(state: &serde_json::Value) -> Vec<String> {
    state["navigation"]
        .as_array()
        .map(|sections| {
            sections
                .iter()
                .filter_map(|s| s["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn item_views(state: &serde_json::Value) -> Vec<String> {
    state["navigation"]
        .as_array()
        .into_iter()
        .flatten()
        .flat_map(|section| section["items"].as_array().cloned().unwrap_or_default())
        .filter_map(|item| item["view"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_signed_out_screens() {
    let server = TestServer::spawn().await;

    for view in ["register", "forgot_password", "login"] {
        let (status, body) = server.post("/api/view", json!({ "view": view })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], view);
    }

    let (status, body) = server.post("/api/view", json!({ "view": "mail_log" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Please sign in first.");

    let (_, state) = server.get("/api/state").await;
    assert_eq!(state["view"], "login");
    assert!(section_titles(&state).is_empty());
}

#[tokio::test]
async fn test_sidebar_depends_on_role() {
    let server = TestServer::spawn().await;

    server.sign_in("user@example.com").await;
    let (_, state) = server.get("/api/state").await;
    let views = item_views(&state);
    assert!(views.contains(&"ai_auditor".to_string()));
    assert!(!views.contains(&"admin_dashboard".to_string()));

    let (status, _) = server
        .post("/api/view", json!({ "view": "admin_dashboard" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    server.post("/api/auth/logout", json!({})).await;
    server.sign_in("admin@example.com").await;
    let (_, state) = server.get("/api/state").await;
    assert!(item_views(&state).contains(&"admin_dashboard".to_string()));

    let (status, body) = server
        .post("/api/view", json!({ "view": "database_schema" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "database_schema");
}
