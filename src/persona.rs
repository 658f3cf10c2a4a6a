//! System-message text for the chat endpoints.

use std::fs;

use anyhow::{Context, Result};
use log::info;

/// Biography the `chat` endpoint answers from when no `CV_PATH` is configured.
///
/// Phone numbers, email addresses and referee details are left out of the
/// built-in text so they are not published with the source. Deployments that
/// want the bot to answer contact questions supply a full CV via `CV_PATH`.
pub const DEFAULT_CV: &str = "\
You are Oracle Bot for Sebastian Fletcher, AI Engineer and data scientist. Respond based on this CV:
- About: Self-taught prompt engineer aspiring to become an AI scientist. Focus: prompt design, model alignment, optimization, interpretability, safe AI deployment. Skills: structured prompting, workflow automation, Python experimentation, performance analysis of LLMs. Bridges practical applications with research.
- Skills: AI & Prompting (prompt design, optimization, context management, workflow automation); Programming (Python, basic); Data Handling; Research & Communication; Languages (English, Spanish).
- Work Experience: Sep 2024 to present, AI Engineer at BD Prototypes (led AI adoption reducing workload by over 50%, built AI knowledge systems with prompt libraries for non-technical staff, AI dashboards for KPIs and trends). Jul 2020 to Aug 2024, Freelance AI Engineer: custom prompts for clients covering content generation, automation, marketing copy, chatbots and data analysis.
- Education: IBM AI Engineering (2025); DeepLearning.AI courses including ChatGPT Prompt Engineering for Developers, Building Systems with the ChatGPT API and LLM Prompting with Gemini; Scientific Baccalaureate (Spain, 2012-2014).
- Questions unrelated to the CV may be answered as a regular assistant would.

Be professional and concise, and tie replies to the CV where relevant.";

pub const DEFAULT_GREETING: &str = "Hello! How can I assist you?";
pub const DEFAULT_TONE: &str = "friendly";
pub const NO_KEYWORDS: &str = "none";

pub const PROMPT_TEMPLATE_INSTRUCTIONS: &str = "\
Generate an optimized prompt template for the task the user describes. \
Ensure it includes clear instructions and placeholders for variables.";

/// Loads the CV from `path`, or falls back to [`DEFAULT_CV`].
pub fn load_cv(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read CV from {}", path))?;
            info!("Loaded CV from {} ({} bytes)", path, text.len());
            Ok(text)
        }
        None => Ok(DEFAULT_CV.to_string()),
    }
}

/// Persona for the chatbot-builder endpoint. Blank settings fall back to the
/// defaults.
pub fn chatbot_persona(greeting: Option<&str>, tone: Option<&str>, keywords: &[String]) -> String {
    let greeting = non_blank(greeting).unwrap_or(DEFAULT_GREETING);
    let tone = non_blank(tone).unwrap_or(DEFAULT_TONE);

    let keywords: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    let keywords = if keywords.is_empty() {
        NO_KEYWORDS.to_string()
    } else {
        keywords.join(", ")
    };

    format!(
        "You are a chatbot with the following settings:\n\
         - Greeting: \"{}\"\n\
         - Tone: {}\n\
         - Keywords to focus on: {}\n\
         Respond to the user input accordingly.",
        greeting, tone, keywords
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_uses_defaults() {
        let persona = chatbot_persona(None, Some("  "), &[]);
        assert!(persona.contains("- Greeting: \"Hello! How can I assist you?\""));
        assert!(persona.contains("- Tone: friendly"));
        assert!(persona.contains("- Keywords to focus on: none"));
    }

    #[test]
    fn persona_joins_keywords_in_order() {
        let keywords = vec!["rust".to_string(), " ".to_string(), "llm".to_string()];
        let persona = chatbot_persona(Some("Hey!"), Some("playful"), &keywords);
        assert!(persona.contains("- Greeting: \"Hey!\""));
        assert!(persona.contains("- Tone: playful"));
        assert!(persona.contains("- Keywords to focus on: rust, llm"));
    }

    #[test]
    fn missing_cv_file_is_an_error() {
        let err = load_cv(Some("/nonexistent/cv.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cv.txt"));
    }

    #[test]
    fn default_cv_without_path() {
        assert_eq!(load_cv(None).unwrap(), DEFAULT_CV);
    }
}
