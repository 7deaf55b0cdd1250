//! Code-generation provider abstractions.
//!
//! A trait seam over the external language-model API so handlers and tests
//! never depend on a live backend.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for code snippet generators.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Whether a real backend is configured.
    fn enabled(&self) -> bool;

    /// Generate a code snippet from a free-form description.
    async fn generate(&self, description: &str, bot_name: &str) -> Result<String, ProviderError>;
}

/// Deterministic template substituted when no provider is configured or the
/// provider call fails.
pub fn fallback_code(bot_name: &str) -> String {
    format!(
        r#"class {bot_name}:
    """Generated bot scaffold."""

    def __init__(self, name: str, skills: list):
        self.name = name
        self.skills = skills

    async def execute(self, task: str) -> dict:
        import asyncio
        await asyncio.sleep(0.1)
        return {{"ok": True, "result": f"Task completed: {{task}}", "bot": self.name}}
"#
    )
}
