use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Server configuration, read once at startup from the process environment
/// (after `.env` has been loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
    pub request_timeout: Duration,
    pub cv_path: Option<String>,
    pub templates_dir: String,
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Missing keys are reported per request, not at startup.
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs: u64 = parse_or(&get, "REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&get, "PORT", 8080)?,
            openai: ProviderConfig {
                api_key: get("OPENAI_API_KEY"),
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| "https://api.openai.com".to_string()),
                default_model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            },
            gemini: ProviderConfig {
                api_key: get("GEMINI_API_KEY"),
                base_url: get("GEMINI_BASE_URL")
                    .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string()),
                default_model: get("GEMINI_MODEL")
                    .unwrap_or_else(|| "gemini-1.5-flash".to_string()),
            },
            request_timeout: Duration::from_secs(timeout_secs),
            cv_path: get("CV_PATH"),
            templates_dir: get("TEMPLATES_DIR").unwrap_or_else(|| "templates".to_string()),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        })
    }
}

/// Settings for the terminal chat client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub request_field: String,
    pub response_field: String,
    pub typing_delay: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            endpoint: get("CHAT_ENDPOINT")
                .unwrap_or_else(|| "http://127.0.0.1:8080/api/chat".to_string()),
            request_field: get("CHAT_REQUEST_FIELD").unwrap_or_else(|| "message".to_string()),
            response_field: get("CHAT_RESPONSE_FIELD").unwrap_or_else(|| "reply".to_string()),
            typing_delay: Duration::from_millis(parse_or(&get, "TYPING_DELAY_MS", 15)?),
            request_timeout: Duration::from_secs(parse_or(&get, "REQUEST_TIMEOUT_SECS", 60)?),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
