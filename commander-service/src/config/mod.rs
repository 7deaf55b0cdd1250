use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Delay before a scheduled task completion job fires.
const DEFAULT_COMPLETION_DELAY_MS: u64 = 1000;

/// Default per-task timeout accepted from callers.
const DEFAULT_TASK_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct CommanderConfig {
    pub common: core_config::Config,
    pub creator: CreatorConfig,
    pub security: SecurityConfig,
    pub openai: OpenAiSettings,
    pub task: TaskSettings,
}

/// The identity seeded into the directory at startup.
#[derive(Debug, Clone)]
pub struct CreatorConfig {
    pub email: String,
    /// Kept for parity with the seed data; unused by API authentication.
    pub password: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Process-wide secret that grants non-admins admin-gated mutations.
    pub override_token: String,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// Absent or blank disables the provider; the fallback template is used.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct TaskSettings {
    pub default_timeout_secs: u64,
    pub completion_delay_ms: u64,
}

impl CommanderConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CommanderConfig {
            common: common_config,
            creator: CreatorConfig {
                email: get_env("CREATOR_EMAIL", Some("creator@example.com"), is_prod)?,
                password: get_env("CREATOR_PASSWORD", Some("change-me"), is_prod)?,
                api_key: get_env("CREATOR_API_KEY", Some("creator-dev-api-key"), is_prod)?,
            },
            security: SecurityConfig {
                override_token: get_env("OVERRIDE_TOKEN", Some("override-dev-token"), is_prod)?,
            },
            openai: OpenAiSettings {
                api_key: env::var("OPENAI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: get_env("OPENAI_MODEL", Some("gpt-4o-mini"), is_prod)?,
                base_url: get_env("OPENAI_BASE_URL", Some("https://api.openai.com/v1"), is_prod)?,
            },
            task: TaskSettings {
                default_timeout_secs: get_env(
                    "TASK_DEFAULT_TIMEOUT_SECS",
                    Some(&DEFAULT_TASK_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_TASK_TIMEOUT_SECS),
                completion_delay_ms: get_env(
                    "TASK_COMPLETION_DELAY_MS",
                    Some(&DEFAULT_COMPLETION_DELAY_MS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_COMPLETION_DELAY_MS),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
