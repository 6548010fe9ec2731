//! Translation provider seam.
//!
//! The generation pipeline translates through the `Translator` trait so the
//! HTTP-backed provider can be swapped for a stub in tests. The production
//! implementation talks to an OpenRouter-compatible chat completions API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TranslatorConfig;
use crate::error::{AppError, AppResult};

/// Translates a single English sentence to Polish
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, sentence: &str) -> AppResult<String>;
}

const SYSTEM_PROMPT: &str = "You are a translator. Translate the user's English \
sentence to Polish. Reply with only the translation, no commentary.";

/// Chat-completions response, reduced to the fields we read
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// OpenRouter-backed translator
pub struct OpenRouterTranslator {
    client: reqwest::Client,
    config: TranslatorConfig,
}

impl OpenRouterTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl Translator for OpenRouterTranslator {
    async fn translate(&self, sentence: &str) -> AppResult<String> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            AppError::Internal("TRANSLATOR_API_KEY is not configured".to_string())
        })?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": sentence },
            ],
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "Request timed out".to_string()
                } else if e.is_connect() {
                    "Connection failed".to_string()
                } else {
                    format!("Request failed: {}", e)
                };
                AppError::Translation(message)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = if error_body.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                format!("HTTP {}: {}", status.as_u16(), error_body)
            };
            return Err(AppError::Translation(message));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Translation(format!("Invalid response body: {}", e)))?;

        let translation = completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Translation("Empty completion".to_string()))?;

        Ok(translation)
    }
}
