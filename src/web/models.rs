use serde::{Deserialize, Serialize};

/// Inbound body shared by every chat endpoint. Which content field is
/// required depends on the endpoint profile.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub input: Option<String>,
    pub task: Option<String>,
    pub greeting: Option<String>,
    pub tone: Option<String>,
    /// `null` and absent both mean no keywords.
    pub keywords: Option<Vec<String>>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    Message,
    Input,
    Task,
}

impl ChatRequest {
    pub fn content(&self, field: ContentField) -> Option<&str> {
        let value = match field {
            ContentField::Message => self.message.as_deref(),
            ContentField::Input => self.input.as_deref(),
            ContentField::Task => self.task.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
