use super::payload::{InterpretationRequest, InterpretationResponse};
use super::InterpretationError;
use crate::catalog::TestDefinition;
use crate::scoring::TestResult;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Caller-side client for a running interpretation service.
#[derive(Debug, Clone)]
pub struct RemoteInterpretationClient {
    http: Client,
    endpoint: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("interpretation service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("interpretation service answered HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("interpretation service returned empty text")]
    EmptyText,
}

impl RemoteInterpretationClient {
    /// `base_url` is the service root; the generate path is appended.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InterpretationError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/generate", base_url.trim_end_matches('/')),
        })
    }

    pub async fn try_interpret(
        &self,
        result: &TestResult,
        definition: &TestDefinition,
    ) -> Result<String, RemoteError> {
        let body = InterpretationRequest {
            result: result.clone(),
            test_def: definition.clone(),
        };
        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|value| value.get("error")?.as_str().map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let payload: InterpretationResponse = response.json().await?;
        if payload.text.trim().is_empty() {
            return Err(RemoteError::EmptyText);
        }
        Ok(payload.text)
    }

    /// Always returns displayable text; failures degrade to [`degraded_notice`].
    pub async fn interpret(&self, result: &TestResult, definition: &TestDefinition) -> String {
        match self.try_interpret(result, definition).await {
            Ok(text) => text,
            Err(err) => {
                warn!(test_id = %result.test_id, error = %err, "remote interpretation failed");
                degraded_notice(result)
            }
        }
    }
}

/// Apology shown when no interpretation could be fetched; keeps the score visible.
pub fn degraded_notice(result: &TestResult) -> String {
    format!(
        "Sorry, we could not generate a detailed interpretation right now. \
         Your score is {} out of {}. Please try again later or discuss the result \
         with a specialist.",
        result.total_score, result.max_possible_score
    )
}
