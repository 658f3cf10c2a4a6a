//! Client-side chat widget.
//!
//! The widget owns a [`Transcript`] and a [`ChatTransport`]. A submission
//! appends the user's line and a pending placeholder, makes one call, and
//! always resolves the placeholder, either with the reply or a fixed
//! fallback.

mod transcript;
mod transport;

use log::{error, warn};

pub use transcript::{Entry, Speaker, Transcript, PENDING_TEXT};
pub use transport::{ChatTransport, HttpTransport, TransportError};

/// Shown when the endpoint answered without the expected reply field.
pub const NO_RESPONSE: &str = "[No response]";
/// Shown when the endpoint could not be reached or returned an error.
pub const CONNECTION_ERROR: &str = "[error connecting to API]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was appended or sent.
    Ignored,
    Replied(String),
    NoResponse,
    Failed,
}

pub struct ChatWidget<T> {
    transcript: Transcript,
    transport: T,
}

impl<T: ChatTransport> ChatWidget<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transcript: Transcript::new(),
            transport,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Records a submission in the transcript. Returns the text to send, or
    /// `None` for blank input.
    pub fn begin(&mut self, input: &str) -> Option<String> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        self.transcript.append(Speaker::You, message);
        self.transcript.append_pending();
        Some(message.to_string())
    }

    /// Resolves the pending placeholder left by [`ChatWidget::begin`].
    pub fn resolve(&mut self, result: Result<Option<String>, TransportError>) -> SubmitOutcome {
        let (text, outcome) = match result {
            Ok(Some(reply)) => (reply.clone(), SubmitOutcome::Replied(reply)),
            Ok(None) => {
                warn!("chat endpoint returned no reply");
                (NO_RESPONSE.to_string(), SubmitOutcome::NoResponse)
            }
            Err(e) => {
                error!("{}", e);
                (CONNECTION_ERROR.to_string(), SubmitOutcome::Failed)
            }
        };
        self.transcript.replace_last_pending(text);
        outcome
    }

    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        let Some(message) = self.begin(input) else {
            return SubmitOutcome::Ignored;
        };
        let result = self.transport.send(&message).await;
        self.resolve(result)
    }
}

/// Successive prefixes of `text`, one character longer each time, for a
/// typewriter-style reveal.
pub fn reveal(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .map(move |(i, c)| &text[..i + c.len_utf8()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<Option<String>, TransportError>>>,
        sent: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn with(replies: Vec<Result<Option<String>, TransportError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn send(&self, message: &str) -> Result<Option<String>, TransportError> {
            self.sent.lock().unwrap().push(message.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(None))
        }
    }

    #[tokio::test]
    async fn hello_round_trip() {
        let transport = ScriptedTransport::with(vec![Ok(Some("Hi! Ask me about my CV.".into()))]);
        let mut widget = ChatWidget::new(transport);

        let message = widget.begin("Hello").unwrap();
        assert_eq!(widget.transcript().render(), "You: Hello\nAI: … thinking");

        let result = widget.transport().send(&message).await;
        let outcome = widget.resolve(result);

        assert_eq!(outcome, SubmitOutcome::Replied("Hi! Ask me about my CV.".into()));
        assert_eq!(
            widget.transcript().render(),
            "You: Hello\nAI: Hi! Ask me about my CV."
        );
        assert!(!widget.transcript().has_pending());
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut widget = ChatWidget::new(ScriptedTransport::default());

        assert_eq!(widget.submit("   \n").await, SubmitOutcome::Ignored);
        assert!(widget.transcript().entries().is_empty());
        assert!(widget.transport().sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_reply_uses_fallback() {
        let mut widget = ChatWidget::new(ScriptedTransport::with(vec![Ok(None)]));

        assert_eq!(widget.submit("ping").await, SubmitOutcome::NoResponse);
        assert_eq!(widget.transcript().last().unwrap().text, NO_RESPONSE);
    }

    #[tokio::test]
    async fn endpoint_error_never_leaves_placeholder() {
        let mut widget =
            ChatWidget::new(ScriptedTransport::with(vec![Err(TransportError::Status(500))]));

        assert_eq!(widget.submit("ping").await, SubmitOutcome::Failed);
        assert_eq!(widget.transcript().render(), "You: ping\nAI: [error connecting to API]");
        assert!(!widget.transcript().has_pending());

        // still usable afterwards
        assert_eq!(widget.submit("again").await, SubmitOutcome::NoResponse);
        assert_eq!(widget.transcript().entries().len(), 4);
    }

    #[tokio::test]
    async fn sends_trimmed_text() {
        let mut widget = ChatWidget::new(ScriptedTransport::with(vec![Ok(Some("ok".into()))]));
        widget.submit("  What are your skills?  ").await;
        assert_eq!(
            widget.transport().sent.lock().unwrap().as_slice(),
            ["What are your skills?".to_string()]
        );
    }

    #[test]
    fn reveal_respects_char_boundaries() {
        let steps: Vec<&str> = reveal("añb").collect();
        assert_eq!(steps, vec!["a", "añ", "añb"]);
        assert_eq!(reveal("").count(), 0);
    }
}
