//! The external generateContent call.
//!
//! The upstream endpoint enforces no schema on the returned text, so the
//! parser here is defensive: empty bodies, markdown code fences, and
//! non-JSON text all surface as typed errors that the bridge turns into a
//! degraded reply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bridge::AssistantReply;

/// Follow-up suggestions are capped regardless of what the model returns.
pub const MAX_FOLLOWUPS: usize = 3;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("no API key in ${0}")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("empty response body")]
    EmptyResponse,
    #[error("unparsable model output: {0}")]
    Parse(#[from] serde_json::Error),
}

// ── wire types ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// The two-field shape the prompts instruct the model to produce.
#[derive(Deserialize)]
struct ModelReply {
    response: String,
    #[serde(default)]
    tags: Vec<String>,
}

// ── client ────────────────────────────────────────────────────────────────────

pub struct GenerateClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GenerateClient {
    pub fn new(
        config: &video_core::config::AssistantConfig,
    ) -> Result<Self, AssistantError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| AssistantError::MissingApiKey(config.api_key_env.clone()))?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// One prompt in, the raw text body of the first candidate out.
    pub async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::Status(response.status()));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Parse the model's `{"response": "...", "tags": [...]}` text into a reply,
/// tolerating a surrounding markdown code fence.
pub fn parse_reply(raw: &str) -> Result<AssistantReply, AssistantError> {
    let trimmed = strip_code_fence(raw.trim());
    if trimmed.is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    let parsed: ModelReply = serde_json::from_str(trimmed)?;
    let mut followups = parsed.tags;
    followups.truncate(MAX_FOLLOWUPS);
    Ok(AssistantReply {
        text: parsed.response,
        followups,
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_plain_json() {
        let reply = parse_reply(r#"{"response":"X","tags":["a","b"]}"#).unwrap();
        assert_eq!(reply.text, "X");
        assert_eq!(reply.followups, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_reply_missing_tags_defaults_empty() {
        let reply = parse_reply(r#"{"response":"just text"}"#).unwrap();
        assert_eq!(reply.text, "just text");
        assert!(reply.followups.is_empty());
    }

    #[test]
    fn test_parse_reply_caps_followups_at_three() {
        let reply =
            parse_reply(r#"{"response":"X","tags":["a","b","c","d","e"]}"#).unwrap();
        assert_eq!(reply.followups.len(), 3);
    }

    #[test]
    fn test_parse_reply_strips_code_fence() {
        let raw = "```json\n{\"response\":\"fenced\",\"tags\":[\"t\"]}\n```";
        let reply = parse_reply(raw).unwrap();
        assert_eq!(reply.text, "fenced");
        assert_eq!(reply.followups, vec!["t"]);
    }

    #[test]
    fn test_parse_reply_rejects_garbage() {
        assert!(matches!(
            parse_reply("not json at all"),
            Err(AssistantError::Parse(_))
        ));
        assert!(matches!(parse_reply("   "), Err(AssistantError::EmptyResponse)));
    }
}
