use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::{require_key, status_error, CompletionProvider, CompletionRequest, ProviderError};
use crate::config::ProviderConfig;
use crate::web::models::Role;

const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Google Gemini `generateContent` client.
pub struct GeminiProvider {
    client: Client,
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        info!("Gemini provider using {}", config.base_url);
        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let api_key = require_key(&self.config, API_KEY_VAR)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            request.model
        );

        let payload = build_payload(request);
        debug!("Gemini payload: {}", payload);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: Value = response.json().await?;
        debug!("Gemini response: {}", body);
        extract_text(&body)
    }
}

fn build_payload(request: &CompletionRequest) -> Value {
    let system: Vec<Value> = request
        .messages
        .iter()
        .filter(|m| matches!(m.role, Role::System))
        .map(|m| json!({ "text": m.content }))
        .collect();

    let contents: Vec<Value> = request
        .messages
        .iter()
        .filter_map(|m| {
            let role = match m.role {
                Role::System => return None,
                Role::User => "user",
                Role::Assistant => "model",
            };
            Some(json!({ "role": role, "parts": [{ "text": m.content }] }))
        })
        .collect();

    let mut payload = json!({
        "contents": contents,
        "generationConfig": {
            "maxOutputTokens": request.max_tokens,
            "temperature": request.temperature,
        },
    });
    if !system.is_empty() {
        payload["systemInstruction"] = json!({ "parts": system });
    }
    payload
}

/// Concatenates the text parts of the first candidate.
fn extract_text(body: &Value) -> Result<String, ProviderError> {
    let parts = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing candidates[0].content.parts".into())
        })?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(ProviderError::InvalidResponse(
            "candidate contained no text parts".into(),
        ));
    }
    Ok(text)
}
