use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to chat endpoint failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("chat endpoint returned status {0}")]
    Status(u16),
}

/// Delivers one message to a chat endpoint. `Ok(None)` means the endpoint
/// answered but without a usable reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<Option<String>, TransportError>;
}

/// Talks to a proxy endpoint over HTTP. Never carries a provider credential.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    request_field: String,
    response_field: String,
}

impl HttpTransport {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        request_field: impl Into<String>,
        response_field: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            request_field: request_field.into(),
            response_field: response_field.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<Option<String>, TransportError> {
        let mut body = Map::new();
        body.insert(self.request_field.clone(), Value::String(message.to_string()));

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(reply_field(&body, &self.response_field))
    }
}

/// Non-string and empty values count as no reply.
fn reply_field(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_configured_field() {
        let body = json!({ "reply": "Hi there" });
        assert_eq!(reply_field(&body, "reply").as_deref(), Some("Hi there"));
        assert_eq!(reply_field(&body, "response"), None);
    }

    #[test]
    fn empty_or_non_string_reply_is_missing() {
        assert_eq!(reply_field(&json!({ "reply": "" }), "reply"), None);
        assert_eq!(reply_field(&json!({ "reply": 42 }), "reply"), None);
        assert_eq!(reply_field(&json!([]), "reply"), None);
    }
}
