//! OpenAI-compatible chat-completions backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::schema::{parse_reply, system_prompt, user_prompt};
use crate::{ExtractedRule, ExtractionRequest, ModelError, ModelExtractor, Result};

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Bearer credential.
    pub api_key: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            temperature: 0.0,
            max_tokens: 1024,
        }
    }
}

impl OpenAiSettings {
    /// Read the credential from the named environment variable.
    pub fn with_api_key_from_env(mut self, var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => {
                self.api_key = key.trim().to_string();
                Ok(self)
            }
            _ => Err(ModelError::Unavailable(format!(
                "environment variable {} is not set",
                var
            ))),
        }
    }
}

/// Extractor backed by a chat-completions endpoint in JSON mode.
pub struct OpenAiExtractor {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiExtractor {
    /// Create an extractor. Fails with [`ModelError::Unavailable`] when no
    /// credential is configured.
    pub fn new(settings: OpenAiSettings) -> Result<Self> {
        if settings.api_key.is_empty() {
            return Err(ModelError::Unavailable("no API key configured".to_string()));
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ModelError::Unavailable(e.to_string()))?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn request_body(&self, request: &ExtractionRequest) -> Value {
        json!({
            "model": self.settings.model,
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system_prompt() },
                { "role": "user", "content": user_prompt(request) },
            ],
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout(self.settings.timeout)
        } else {
            ModelError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl ModelExtractor for OpenAiExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> Result<Vec<ExtractedRule>> {
        debug!(
            "Requesting extraction for {} from {} ({} chars)",
            request.icao,
            self.settings.model,
            request.text.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ModelError::Malformed("reply has no message content".to_string()))?;

        let rules = parse_reply(content)?;
        debug!("Model returned {} rules for {}", rules.len(), request.icao);
        Ok(rules)
    }

    fn name(&self) -> &str {
        &self.settings.model
    }
}
