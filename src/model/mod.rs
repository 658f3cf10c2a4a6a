//! Upstream text-generation providers.
//!
//! Each provider turns a [`CompletionRequest`] into exactly one HTTP call and
//! hands back the generated text. Credentials come from [`ProviderConfig`];
//! nothing a caller sends can supply or override them.

mod gemini;
mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::{AppConfig, ProviderConfig};
use crate::web::models::Message;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),
    #[error("request to provider failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// A fully built upstream call: system message first, then the user's text.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

/// The providers a running server can reach, one per [`ProviderKind`].
pub struct Providers {
    openai: Arc<dyn CompletionProvider>,
    gemini: Arc<dyn CompletionProvider>,
}

impl Providers {
    pub fn new(openai: Arc<dyn CompletionProvider>, gemini: Arc<dyn CompletionProvider>) -> Self {
        Self { openai, gemini }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let client = http_client(config.request_timeout)?;
        Ok(Self::new(
            Arc::new(OpenAiProvider::new(client.clone(), &config.openai)),
            Arc::new(GeminiProvider::new(client, &config.gemini)),
        ))
    }

    pub fn get(&self, kind: ProviderKind) -> &Arc<dyn CompletionProvider> {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
        }
    }
}

fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn require_key<'a>(config: &'a ProviderConfig, var: &'static str) -> Result<&'a str, ProviderError> {
    config
        .api_key
        .as_deref()
        .ok_or(ProviderError::MissingCredential(var))
}

/// Reads the body of a non-2xx response into a [`ProviderError::Status`].
async fn status_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ProviderError::Status { status, body }
}
