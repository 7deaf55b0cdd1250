//! Test helper module for commander-service integration tests.

#![allow(dead_code)]

use commander_service::config::{
    CommanderConfig, CreatorConfig, OpenAiSettings, SecurityConfig, TaskSettings,
};
use commander_service::models::Identity;
use commander_service::startup::{AppState, Application};
use once_cell::sync::Lazy;
use service_core::config::Config as CommonConfig;

pub const CREATOR_EMAIL: &str = "creator@test.local";
pub const CREATOR_API_KEY: &str = "creator-test-api-key";
pub const OVERRIDE_TOKEN: &str = "override-test-token";

/// Completion delay used by default; long enough that two HTTP round trips
/// comfortably fit before it fires, short enough to await in tests.
pub const DEFAULT_COMPLETION_DELAY_MS: u64 = 50;

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        service_core::observability::init_tracing("commander-service-test", "debug");
    }
});

/// Test application with a running HTTP server on a random port.
pub struct TestApp {
    pub address: String,
    pub state: AppState,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_completion_delay(DEFAULT_COMPLETION_DELAY_MS).await
    }

    pub async fn spawn_with_completion_delay(completion_delay_ms: u64) -> Self {
        Lazy::force(&TRACING);

        let config = test_config(completion_delay_ms);
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let address = format!("http://127.0.0.1:{}", app.port());
        let state = app.state();

        tokio::spawn(app.run_until_stopped());

        TestApp {
            address,
            state,
            client: reqwest::Client::new(),
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Register an extra non-admin identity directly in the directory
    /// (runtime registration is out of scope for the HTTP surface).
    pub fn register_identity(&self, email: &str, api_key: &str) {
        let identity = Identity::new(
            email.to_string(),
            "password".to_string(),
            api_key.to_string(),
            false,
        );
        self.state
            .directory
            .insert(identity)
            .expect("Failed to register test identity");
    }

    /// Create a bot over HTTP as the given API key, returning its id.
    pub async fn create_bot(&self, api_key: &str, name: &str) -> String {
        let response = self
            .client
            .post(format!("{}/api/bots", self.address))
            .header("X-API-Key", api_key)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 201);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["bot"]["id"]
            .as_str()
            .expect("bot id missing")
            .to_string()
    }
}

fn test_config(completion_delay_ms: u64) -> CommanderConfig {
    CommanderConfig {
        common: CommonConfig {
            port: 0,
            log_level: "debug".to_string(),
        },
        creator: CreatorConfig {
            email: CREATOR_EMAIL.to_string(),
            password: "test-password".to_string(),
            api_key: CREATOR_API_KEY.to_string(),
        },
        security: SecurityConfig {
            override_token: OVERRIDE_TOKEN.to_string(),
        },
        openai: OpenAiSettings {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        },
        task: TaskSettings {
            default_timeout_secs: 30,
            completion_delay_ms,
        },
    }
}
