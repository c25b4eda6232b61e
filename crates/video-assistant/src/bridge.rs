//! The assistant bridge: one request/response contract shared by the comment
//! analysis and video chat surfaces.
//!
//! `ask` is infallible from the caller's view.  Every failure mode — missing
//! key, network error, non-success status, empty body, unparsable text —
//! degrades into a canned plain-language reply with no follow-ups, and
//! exactly one reply is produced per call.

use tracing::warn;
use video_core::config::AssistantConfig;
use video_core::types::{Comment, MediaItem};

use crate::api::{parse_reply, AssistantError, GenerateClient};
use crate::prompt;

/// What the assistant answered: a short text plus up to three suggested
/// follow-up prompts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssistantReply {
    pub text: String,
    pub followups: Vec<String>,
}

/// Caller-specific context for one question.
#[derive(Debug, Clone)]
pub enum AskContext {
    /// Comment Q&A: the full visible comment thread.
    Comments { comments: Vec<Comment> },
    /// Video chat: the watched video's metadata.
    Video { video: MediaItem },
}

impl AskContext {
    fn build_prompt(&self, user_text: &str) -> String {
        match self {
            AskContext::Comments { comments } => prompt::comment_analysis(comments, user_text),
            AskContext::Video { video } => prompt::video_chat(video, user_text),
        }
    }

    /// Degraded message for a call that produced nothing usable.
    fn empty_reply_text(&self) -> &'static str {
        match self {
            AskContext::Comments { .. } => "Could not analyze comments.",
            AskContext::Video { .. } => "I couldn't generate a response.",
        }
    }

    /// Degraded message for a failed call.
    fn error_reply_text(&self) -> &'static str {
        match self {
            AskContext::Comments { .. } => {
                "Sorry, I encountered an error analyzing the comments."
            }
            AskContext::Video { .. } => "Sorry, I'm having trouble connecting right now.",
        }
    }
}

pub struct AssistantBridge {
    /// `None` when no API key was found; every ask degrades immediately.
    client: Option<GenerateClient>,
}

impl AssistantBridge {
    pub fn new(config: &AssistantConfig) -> Self {
        let client = match GenerateClient::new(config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("assistant disabled: {}", e);
                None
            }
        };
        Self { client }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Ask the model.  `user_text` must be non-empty (callers gate this).
    pub async fn ask(&self, context: &AskContext, user_text: &str) -> AssistantReply {
        match self.try_ask(context, user_text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("assistant call degraded: {}", e);
                let text = match e {
                    AssistantError::EmptyResponse => context.empty_reply_text(),
                    _ => context.error_reply_text(),
                };
                AssistantReply {
                    text: text.to_string(),
                    followups: Vec::new(),
                }
            }
        }
    }

    async fn try_ask(
        &self,
        context: &AskContext,
        user_text: &str,
    ) -> Result<AssistantReply, AssistantError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AssistantError::MissingApiKey("unset".into()))?;
        let prompt = context.build_prompt(user_text);
        let raw = client.generate(&prompt).await?;
        parse_reply(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable_bridge() -> AssistantBridge {
        // Point at an env var that cannot exist so the key lookup fails.
        let config = AssistantConfig {
            api_key_env: "V1DEO_TEST_NO_SUCH_KEY".into(),
            ..AssistantConfig::default()
        };
        AssistantBridge::new(&config)
    }

    #[tokio::test]
    async fn test_ask_degrades_for_comment_surface() {
        let bridge = unavailable_bridge();
        assert!(!bridge.is_available());
        let ctx = AskContext::Comments { comments: vec![] };
        let reply = bridge.ask(&ctx, "summarize the thread").await;
        assert_eq!(
            reply.text,
            "Sorry, I encountered an error analyzing the comments."
        );
        assert!(reply.followups.is_empty());
    }

    #[tokio::test]
    async fn test_ask_degrades_for_video_surface() {
        let bridge = unavailable_bridge();
        let ctx = AskContext::Video {
            video: MediaItem::default(),
        };
        let reply = bridge.ask(&ctx, "what is this about?").await;
        assert_eq!(reply.text, "Sorry, I'm having trouble connecting right now.");
        assert!(reply.followups.is_empty());
    }
}
