pub mod api;
pub mod bridge;
pub mod exchange;
pub mod prompt;

pub use bridge::{AskContext, AssistantBridge, AssistantReply};
pub use exchange::{AssistantExchange, Sender, SubmitError, Turn};
