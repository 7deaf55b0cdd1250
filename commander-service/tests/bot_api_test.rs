//! Bot management integration tests.

mod common;

use common::{TestApp, CREATOR_API_KEY};

#[tokio::test]
async fn create_bot_returns_created_record() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/api/bots", app.address))
        .header("X-API-Key", CREATOR_API_KEY)
        .json(&serde_json::json!({
            "name": "AnalyzerBot",
            "skills": ["analysis", "thinking"],
            "description": "Analyzes things"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["bot"]["name"], "AnalyzerBot");
    assert_eq!(body["bot"]["owner"], common::CREATOR_EMAIL);
    assert_eq!(body["bot"]["alive"], true);
    assert_eq!(body["bot"]["tasks_completed"], 0);
    assert_eq!(body["bot"]["skills"][1], "thinking");
}

#[tokio::test]
async fn create_bot_defaults_skills_when_omitted() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/api/bots", app.address))
        .header("X-API-Key", CREATOR_API_KEY)
        .json(&serde_json::json!({ "name": "PlainBot" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["bot"]["skills"], serde_json::json!(["general"]));
}

#[tokio::test]
async fn create_bot_rejects_empty_name() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/api/bots", app.address))
        .header("X-API-Key", CREATOR_API_KEY)
        .json(&serde_json::json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn bot_listing_is_scoped_to_owner() {
    let app = TestApp::spawn().await;
    app.register_identity("alice@test.local", "alice-key");
    app.register_identity("bob@test.local", "bob-key");

    app.create_bot("alice-key", "AliceBot1").await;
    app.create_bot("alice-key", "AliceBot2").await;
    app.create_bot("bob-key", "BobBot").await;

    let list = |key: &'static str| {
        let app = &app;
        async move {
            let response = app
                .client()
                .get(format!("{}/api/bots", app.address))
                .header("X-API-Key", key)
                .send()
                .await
                .expect("Failed to execute request");
            assert_eq!(response.status(), 200);
            response
                .json::<serde_json::Value>()
                .await
                .expect("Failed to parse response")
        }
    };

    let alice_view = list("alice-key").await;
    assert_eq!(alice_view["count"], 2);

    let bob_view = list("bob-key").await;
    assert_eq!(bob_view["count"], 1);
    assert_eq!(bob_view["bots"][0]["name"], "BobBot");

    // Admin sees everything
    let admin_view = list(CREATOR_API_KEY).await;
    assert_eq!(admin_view["count"], 3);
}

#[tokio::test]
async fn delete_missing_bot_returns_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .delete(format!("{}/api/bots/no-such-bot", app.address))
        .header("X-API-Key", CREATOR_API_KEY)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}
