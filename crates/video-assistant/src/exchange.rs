//! Per-surface conversation state.
//!
//! An exchange is an append-only list of turns owned by the UI session and
//! cleared on navigation away.  At most one call may be outstanding per
//! surface: `begin` gates new submissions until `resolve` lands the reply.

use thiserror::Error;

use crate::bridge::AssistantReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub sender: Sender,
    pub text: String,
    /// Suggested follow-up prompts; only ever present on assistant turns.
    pub followups: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("input is empty")]
    EmptyInput,
    #[error("a request is already outstanding")]
    Busy,
}

#[derive(Debug, Default)]
pub struct AssistantExchange {
    turns: Vec<Turn>,
    in_flight: bool,
}

impl AssistantExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Record the user's question and mark the surface busy.  Returns the
    /// trimmed text to send to the bridge.
    pub fn begin(&mut self, user_text: &str) -> Result<String, SubmitError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.in_flight {
            return Err(SubmitError::Busy);
        }
        self.turns.push(Turn {
            sender: Sender::User,
            text: text.to_string(),
            followups: Vec::new(),
        });
        self.in_flight = true;
        Ok(text.to_string())
    }

    /// Land the reply (successful or degraded) and release the gate.
    pub fn resolve(&mut self, reply: AssistantReply) {
        self.turns.push(Turn {
            sender: Sender::Assistant,
            text: reply.text,
            followups: reply.followups,
        });
        self.in_flight = false;
    }

    /// Navigation away discards the conversation.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.in_flight = false;
    }
}
