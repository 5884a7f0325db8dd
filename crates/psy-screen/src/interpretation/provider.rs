use super::prompt::InterpretationPrompt;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Gemini,
    Groq,
}

impl ProviderKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Groq => "groq",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a failed provider call, classified for the retry loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("temporarily unavailable (HTTP 503)")]
    Unavailable,
    #[error("request rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("provider returned an empty interpretation")]
    EmptyResponse,
}

impl ProviderError {
    /// Maps a non-success HTTP status onto the error taxonomy.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            429 => ProviderError::RateLimited,
            503 => ProviderError::Unavailable,
            _ => ProviderError::Rejected {
                status,
                body: truncate(body.into(), 512),
            },
        }
    }

    /// Only rate limiting and transient unavailability earn a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::RateLimited | ProviderError::Unavailable)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

fn truncate(mut body: String, limit: usize) -> String {
    if body.len() > limit {
        let mut cut = limit;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

/// Remote language-model backend able to turn a prompt into interpretation text.
#[async_trait]
pub trait InterpretationProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// One network call; retrying is the caller's concern.
    async fn generate(&self, prompt: &InterpretationPrompt) -> Result<String, ProviderError>;
}
