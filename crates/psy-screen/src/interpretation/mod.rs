//! Natural-language interpretation of a scored result.
//!
//! [`InterpretationCascade`] tries each configured remote provider in order
//! (Gemini, then Groq), each with a single bounded retry on rate-limit or
//! unavailable responses, and finishes with [`static_interpretation`], which
//! never fails. Provider errors are logged and absorbed; callers always get
//! text back.

mod cascade;
mod fallback;
mod gemini;
mod groq;
mod payload;
mod prompt;
mod provider;
mod remote;
mod retry;

pub use cascade::{Interpretation, InterpretationCascade, InterpretationSource};
pub use fallback::static_interpretation;
pub use gemini::GeminiClient;
pub use groq::GroqClient;
pub use payload::{InterpretationRequest, InterpretationResponse};
pub use prompt::{build_prompt, score_summary, InterpretationPrompt};
pub use provider::{InterpretationProvider, ProviderError, ProviderKind};
pub use remote::{degraded_notice, RemoteError, RemoteInterpretationClient};
pub use retry::{attempt_provider, RetryPolicy};

/// Failure while wiring up provider clients at startup.
#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
