use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::{require_key, status_error, CompletionProvider, CompletionRequest, ProviderError};
use crate::config::ProviderConfig;

const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI chat-completions client.
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
}

impl OpenAiProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        info!("OpenAI provider using {}", config.base_url);
        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let api_key = require_key(&self.config, API_KEY_VAR)?;
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let payload = build_payload(request);
        debug!("OpenAI payload: {}", payload);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: Value = response.json().await?;
        debug!("OpenAI response: {}", body);
        extract_content(&body)
    }
}

fn build_payload(request: &CompletionRequest) -> Value {
    json!({
        "model": request.model,
        "messages": request.messages,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    })
}

fn extract_content(body: &Value) -> Result<String, ProviderError> {
    let content = body
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing choices[0].message.content".into())
        })?;

    if content.trim().is_empty() {
        return Err(ProviderError::InvalidResponse("choice contained no text".into()));
    }
    Ok(content.to_string())
}
