//! OpenAI chat-completions code generator.

use super::{CodeGenerator, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OpenAiCodeGenerator {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiCodeGenerator {
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model,
            base_url,
            client,
        }
    }

    fn build_prompt(description: &str, bot_name: &str) -> String {
        format!(
            "Create a Python class named {bot_name} with:\n\
             1. An __init__ method taking 'name' and 'skills' parameters\n\
             2. An async execute method taking 'task' parameter\n\
             3. Return a dictionary with 'ok' and 'result' keys\n\
             4. Based on this description: {description}\n\n\
             Requirements:\n\
             - Must be valid Python 3.9+ code\n\
             - Include error handling\n\
             - Use asyncio for async operations\n\
             - No external dependencies unless necessary\n\n\
             Return ONLY the Python code, no explanations:"
        )
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Strip the markdown code fences models sometimes wrap around their output.
pub(crate) fn strip_code_fences(raw: &str) -> String {
    let mut code = raw.trim();
    if let Some(rest) = code.strip_prefix("```python") {
        code = rest;
    } else if let Some(rest) = code.strip_prefix("```") {
        code = rest;
    }
    if let Some(rest) = code.strip_suffix("```") {
        code = rest;
    }
    code.trim().to_string()
}

#[async_trait]
impl CodeGenerator for OpenAiCodeGenerator {
    fn enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, description: &str, bot_name: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a Python expert. Output only valid Python code.".to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::build_prompt(description, bot_name),
                },
            ],
            temperature: 0.7,
            max_tokens: 800,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        tracing::debug!(
            model = %self.model,
            description_len = description.len(),
            "sending code generation request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!("{}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".to_string()))?;

        Ok(strip_code_fences(&content))
    }
}
