use super::prompt::InterpretationPrompt;
use super::provider::{InterpretationProvider, ProviderError};
use std::time::Duration;
use tracing::{debug, warn};

/// Bounds for a single provider's attempts within one interpretation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls including the first one.
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Backoff in whole milliseconds, clamped to `u64::MAX`.
    pub fn backoff_millis(&self) -> u64 {
        u64::try_from(self.backoff.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Calls the provider until it succeeds, fails permanently, or the policy's
/// attempts are used up. Blank text counts as a permanent failure.
pub async fn attempt_provider(
    provider: &dyn InterpretationProvider,
    prompt: &InterpretationPrompt,
    policy: RetryPolicy,
) -> Result<String, ProviderError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let outcome = provider.generate(prompt).await.and_then(|text| {
            if text.trim().is_empty() {
                Err(ProviderError::EmptyResponse)
            } else {
                Ok(text)
            }
        });

        match outcome {
            Ok(text) => {
                debug!(provider = %provider.kind(), attempt, "provider returned interpretation");
                return Ok(text);
            }
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                warn!(
                    provider = %provider.kind(),
                    attempt,
                    backoff_ms = policy.backoff_millis(),
                    error = %err,
                    "provider call failed; retrying after backoff"
                );
                tokio::time::sleep(policy.backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
