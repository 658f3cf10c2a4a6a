use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::model::ProviderError;

/// Shown in place of any server-side failure detail.
pub const UNAVAILABLE_DETAIL: &str = "the assistant is temporarily unavailable";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    BadRequest(String),
    /// A provider credential is missing from the environment.
    #[error("{context}: {variable} is not set")]
    Configuration {
        context: &'static str,
        variable: &'static str,
    },
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        source: ProviderError,
    },
}

impl ProxyError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn from_provider(context: &'static str, err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredential(variable) => Self::Configuration { context, variable },
            source => Self::Upstream { context, source },
        }
    }

    /// The message returned to the caller. Server-side failures never carry
    /// the internal detail; that only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::MethodNotAllowed | Self::BadRequest(_) => self.to_string(),
            Self::Configuration { context, .. } | Self::Upstream { context, .. } => {
                format!("{}: {}", context, UNAVAILABLE_DETAIL)
            }
        }
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Configuration { .. } | Self::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.public_message() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_maps_to_configuration() {
        let err = ProxyError::from_provider(
            "Internal server error",
            ProviderError::MissingCredential("OPENAI_API_KEY"),
        );
        assert!(matches!(err, ProxyError::Configuration { .. }));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(!err.public_message().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn upstream_detail_stays_out_of_public_message() {
        let err = ProxyError::from_provider(
            "Internal server error",
            ProviderError::Status {
                status: 401,
                body: "Incorrect API key provided: sk-abc".to_string(),
            },
        );
        assert!(err.to_string().contains("sk-abc"));
        assert_eq!(
            err.public_message(),
            "Internal server error: the assistant is temporarily unavailable"
        );
    }

    #[test]
    fn client_errors_keep_their_message() {
        assert_eq!(
            ProxyError::bad_request("Task is required").public_message(),
            "Task is required"
        );
        assert_eq!(ProxyError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
