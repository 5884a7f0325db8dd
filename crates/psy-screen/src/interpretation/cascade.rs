use super::fallback::static_interpretation;
use super::gemini::GeminiClient;
use super::groq::GroqClient;
use super::prompt::build_prompt;
use super::provider::{InterpretationProvider, ProviderKind};
use super::retry::{attempt_provider, RetryPolicy};
use super::InterpretationError;
use crate::catalog::TestDefinition;
use crate::config::ProviderConfig;
use crate::scoring::TestResult;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Which branch of the cascade produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpretationSource {
    Gemini,
    Groq,
    StaticFallback,
}

impl From<ProviderKind> for InterpretationSource {
    fn from(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Gemini => InterpretationSource::Gemini,
            ProviderKind::Groq => InterpretationSource::Groq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub text: String,
    pub source: InterpretationSource,
}

/// Ordered providers followed by the static fallback.
#[derive(Clone)]
pub struct InterpretationCascade {
    providers: Vec<Arc<dyn InterpretationProvider>>,
    policy: RetryPolicy,
}

impl InterpretationCascade {
    pub fn new(providers: Vec<Arc<dyn InterpretationProvider>>, policy: RetryPolicy) -> Self {
        Self { providers, policy }
    }

    /// Cascade that always answers from the static fallback.
    pub fn offline() -> Self {
        Self::new(Vec::new(), RetryPolicy::default())
    }

    /// Gemini then Groq, each only when its credential is configured.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, InterpretationError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let mut providers: Vec<Arc<dyn InterpretationProvider>> = Vec::new();
        if let Some(settings) = &config.gemini {
            providers.push(Arc::new(GeminiClient::new(http.clone(), settings.clone())));
        }
        if let Some(settings) = &config.groq {
            providers.push(Arc::new(GroqClient::new(http, settings.clone())));
        }

        Ok(Self::new(providers, RetryPolicy::default()))
    }

    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|provider| provider.kind()).collect()
    }

    /// Never fails; provider errors are logged and the next branch is tried.
    pub async fn interpret(
        &self,
        result: &TestResult,
        definition: &TestDefinition,
    ) -> Interpretation {
        let prompt = build_prompt(result, definition);

        for provider in &self.providers {
            let kind = provider.kind();
            match attempt_provider(provider.as_ref(), &prompt, self.policy).await {
                Ok(text) => {
                    info!(test_id = %result.test_id, provider = %kind, "interpretation generated");
                    return Interpretation {
                        text,
                        source: kind.into(),
                    };
                }
                Err(err) => {
                    warn!(
                        test_id = %result.test_id,
                        provider = %kind,
                        error = %err,
                        "provider failed; falling through"
                    );
                }
            }
        }

        info!(test_id = %result.test_id, "using static interpretation");
        Interpretation {
            text: static_interpretation(result, definition),
            source: InterpretationSource::StaticFallback,
        }
    }
}

impl std::fmt::Debug for InterpretationCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterpretationCascade")
            .field("providers", &self.provider_kinds())
            .field("policy", &self.policy)
            .finish()
    }
}
