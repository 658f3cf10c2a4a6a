//! Endpoint profiles.
//!
//! Every chat endpoint runs the same handler; a profile supplies what differs
//! between them: the required content field, the persona, the provider and
//! its sampling limits, and the field name of the reply.

use crate::config::AppConfig;
use crate::model::{CompletionRequest, ProviderKind};
use crate::persona;
use crate::web::error::ProxyError;
use crate::web::models::{ChatRequest, ContentField, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaSource {
    /// The configured CV.
    Cv,
    /// Built from the request's greeting, tone and keywords.
    Configurable,
    PromptTemplate,
}

#[derive(Debug, Clone)]
pub struct EndpointProfile {
    pub name: &'static str,
    pub path: &'static str,
    pub content_field: ContentField,
    pub missing_content: &'static str,
    pub response_field: &'static str,
    pub persona: PersonaSource,
    pub provider: ProviderKind,
    pub model: String,
    pub caller_selects_model: bool,
    pub max_tokens: u32,
    pub temperature: f32,
    pub failure_message: &'static str,
}

impl EndpointProfile {
    pub fn defaults(config: &AppConfig) -> Vec<EndpointProfile> {
        vec![
            EndpointProfile {
                name: "chat",
                path: "/chat",
                content_field: ContentField::Message,
                missing_content: "No message provided",
                response_field: "reply",
                persona: PersonaSource::Cv,
                provider: ProviderKind::OpenAi,
                model: config.openai.default_model.clone(),
                caller_selects_model: false,
                max_tokens: 300,
                temperature: 0.7,
                failure_message: "Internal server error",
            },
            EndpointProfile {
                name: "chatbot-builder",
                path: "/chatbot-builder",
                content_field: ContentField::Input,
                missing_content: "Input is required",
                response_field: "response",
                persona: PersonaSource::Configurable,
                provider: ProviderKind::Gemini,
                model: config.gemini.default_model.clone(),
                caller_selects_model: false,
                max_tokens: 300,
                temperature: 0.7,
                failure_message: "Failed to generate chatbot response",
            },
            EndpointProfile {
                name: "prompt-library",
                path: "/prompt-library",
                content_field: ContentField::Task,
                missing_content: "Task is required",
                response_field: "prompt",
                persona: PersonaSource::PromptTemplate,
                provider: ProviderKind::Gemini,
                model: "gemini-1.5-pro".to_string(),
                caller_selects_model: true,
                max_tokens: 400,
                temperature: 0.2,
                failure_message: "Failed to generate prompt",
            },
        ]
    }

    /// Validates `request` and builds the upstream call. Touches neither
    /// credentials nor the network.
    pub fn build_completion(
        &self,
        request: &ChatRequest,
        cv: &str,
    ) -> Result<CompletionRequest, ProxyError> {
        let content = request
            .content(self.content_field)
            .ok_or_else(|| ProxyError::bad_request(self.missing_content))?;

        let system = match self.persona {
            PersonaSource::Cv => cv.to_string(),
            PersonaSource::Configurable => persona::chatbot_persona(
                request.greeting.as_deref(),
                request.tone.as_deref(),
                request.keywords.as_deref().unwrap_or_default(),
            ),
            PersonaSource::PromptTemplate => persona::PROMPT_TEMPLATE_INSTRUCTIONS.to_string(),
        };

        Ok(CompletionRequest {
            model: self.select_model(request.model.as_deref())?,
            messages: vec![Message::system(system), Message::user(content)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        })
    }

    fn select_model(&self, requested: Option<&str>) -> Result<String, ProxyError> {
        let requested = requested.map(str::trim).filter(|m| !m.is_empty());
        match requested {
            Some(model) if self.caller_selects_model => {
                if is_valid_model_id(model) {
                    Ok(model.to_string())
                } else {
                    Err(ProxyError::bad_request("Invalid model"))
                }
            }
            _ => Ok(self.model.clone()),
        }
    }
}

/// Model ids end up in the provider URL path.
fn is_valid_model_id(model: &str) -> bool {
    model.len() <= 64
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        && !model.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::models::Role;

    fn profile(name: &str) -> EndpointProfile {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        EndpointProfile::defaults(&config)
            .into_iter()
            .find(|p| p.name == name)
            .unwrap()
    }

    #[test]
    fn chat_profile_puts_cv_before_message() {
        let request = ChatRequest {
            message: Some("What are your skills?".to_string()),
            ..Default::default()
        };

        let completion = profile("chat").build_completion(&request, "THE CV").unwrap();

        assert_eq!(completion.messages.len(), 2);
        assert!(matches!(completion.messages[0].role, Role::System));
        assert_eq!(completion.messages[0].content, "THE CV");
        assert!(matches!(completion.messages[1].role, Role::User));
        assert_eq!(completion.messages[1].content, "What are your skills?");
        assert_eq!(completion.model, "gpt-4o-mini");
        assert_eq!(completion.max_tokens, 300);
    }

    #[test]
    fn user_content_is_passed_verbatim() {
        let request = ChatRequest {
            input: Some("  <b>hi</b>\n".to_string()),
            ..Default::default()
        };
        let completion = profile("chatbot-builder")
            .build_completion(&request, "")
            .unwrap();
        assert_eq!(completion.messages[1].content, "  <b>hi</b>\n");
    }

    #[test]
    fn blank_content_is_rejected() {
        let request = ChatRequest {
            message: Some("   ".to_string()),
            ..Default::default()
        };
        let err = profile("chat").build_completion(&request, "").unwrap_err();
        assert_eq!(err.public_message(), "No message provided");
    }

    #[test]
    fn each_profile_reads_its_own_field() {
        let request = ChatRequest {
            message: Some("hello".to_string()),
            ..Default::default()
        };
        let err = profile("prompt-library")
            .build_completion(&request, "")
            .unwrap_err();
        assert_eq!(err.public_message(), "Task is required");
    }

    #[test]
    fn prompt_library_honours_requested_model() {
        let mut request = ChatRequest {
            task: Some("summarise a paper".to_string()),
            ..Default::default()
        };
        let p = profile("prompt-library");
        assert_eq!(p.build_completion(&request, "").unwrap().model, "gemini-1.5-pro");

        request.model = Some("gemini-1.5-flash".to_string());
        assert_eq!(p.build_completion(&request, "").unwrap().model, "gemini-1.5-flash");

        request.model = Some("../../v1/files".to_string());
        let err = p.build_completion(&request, "").unwrap_err();
        assert_eq!(err.public_message(), "Invalid model");
    }

    #[test]
    fn other_profiles_ignore_requested_model() {
        let request = ChatRequest {
            message: Some("hi".to_string()),
            model: Some("gpt-4o".to_string()),
            ..Default::default()
        };
        let completion = profile("chat").build_completion(&request, "").unwrap();
        assert_eq!(completion.model, "gpt-4o-mini");
    }
}
