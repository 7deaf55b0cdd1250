//! Code generation and approval integration tests.
//!
//! The provider is disabled in the test configuration, so every generation
//! exercises the fallback template path.

mod common;

use common::{TestApp, CREATOR_API_KEY, OVERRIDE_TOKEN};

async fn generate(app: &TestApp, api_key: &str, bot_name: &str) -> serde_json::Value {
    let response = app
        .client()
        .post(format!("{}/api/code/generate", app.address))
        .header("X-API-Key", api_key)
        .json(&serde_json::json!({
            "description": "A bot that can analyze text and answer questions",
            "bot_name": bot_name
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 201);
    response
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
async fn generate_code_uses_fallback_when_provider_disabled() {
    let app = TestApp::spawn().await;

    let body = generate(&app, CREATOR_API_KEY, "SmartBot").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["generator_used"], false);
    assert_eq!(body["name"], "SmartBot");
    assert!(body["code_preview"]
        .as_str()
        .unwrap()
        .starts_with("class SmartBot:"));
    assert!(body["full_code"]
        .as_str()
        .unwrap()
        .contains("async def execute"));
}

#[tokio::test]
async fn generate_code_defaults_bot_name() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/api/code/generate", app.address))
        .header("X-API-Key", CREATOR_API_KEY)
        .json(&serde_json::json!({ "description": "a generic helper" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "GeneratedBot");
}

#[tokio::test]
async fn get_code_requires_ownership() {
    let app = TestApp::spawn().await;
    app.register_identity("alice@test.local", "alice-key");
    app.register_identity("bob@test.local", "bob-key");

    let body = generate(&app, "alice-key", "AliceBot").await;
    let code_id = body["code_id"].as_str().unwrap();

    let forbidden = app
        .client()
        .get(format!("{}/api/code/{}", app.address, code_id))
        .header("X-API-Key", "bob-key")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forbidden.status(), 403);

    let allowed = app
        .client()
        .get(format!("{}/api/code/{}", app.address, code_id))
        .header("X-API-Key", "alice-key")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(allowed.status(), 200);

    let body: serde_json::Value = allowed.json().await.expect("Failed to parse response");
    assert_eq!(body["code"]["owner"], "alice@test.local");
    assert_eq!(body["code"]["approved"], false);
}

#[tokio::test]
async fn approve_without_override_is_rejected_for_non_admin() {
    let app = TestApp::spawn().await;
    app.register_identity("alice@test.local", "alice-key");

    let body = generate(&app, "alice-key", "AliceBot").await;
    let code_id = body["code_id"].as_str().unwrap();

    let response = app
        .client()
        .post(format!("{}/api/code/{}/approve", app.address, code_id))
        .header("X-API-Key", "alice-key")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn approve_with_override_sets_audit_fields() {
    let app = TestApp::spawn().await;
    app.register_identity("alice@test.local", "alice-key");

    let body = generate(&app, "alice-key", "AliceBot").await;
    let code_id = body["code_id"].as_str().unwrap();

    let response = app
        .client()
        .post(format!("{}/api/code/{}/approve", app.address, code_id))
        .header("X-API-Key", "alice-key")
        .json(&serde_json::json!({ "override_token": OVERRIDE_TOKEN }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["approved"], true);

    let record = app.state.codes.get(code_id).expect("code record missing");
    assert!(record.approved);
    assert!(record.approved_at.is_some());
    assert_eq!(record.approved_by.as_deref(), Some("alice@test.local"));
}

#[tokio::test]
async fn admin_approves_foreign_code_without_override() {
    let app = TestApp::spawn().await;
    app.register_identity("alice@test.local", "alice-key");

    let body = generate(&app, "alice-key", "AliceBot").await;
    let code_id = body["code_id"].as_str().unwrap();

    let response = app
        .client()
        .post(format!("{}/api/code/{}/approve", app.address, code_id))
        .header("X-API-Key", CREATOR_API_KEY)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let record = app.state.codes.get(code_id).expect("code record missing");
    assert_eq!(record.approved_by.as_deref(), Some(common::CREATOR_EMAIL));
}

#[tokio::test]
async fn approve_missing_code_returns_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/api/code/no-such-code/approve", app.address))
        .header("X-API-Key", CREATOR_API_KEY)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}
