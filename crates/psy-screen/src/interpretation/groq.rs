use super::prompt::InterpretationPrompt;
use super::provider::{InterpretationProvider, ProviderError, ProviderKind};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Groq client speaking the OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: Client,
    settings: ProviderSettings,
}

impl GroqClient {
    pub fn new(http: Client, settings: ProviderSettings) -> Self {
        Self { http, settings }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl InterpretationProvider for GroqClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn generate(&self, prompt: &InterpretationPrompt) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.instructions,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.request,
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status.as_u16(), body));
        }

        let payload: ChatResponse = response.json().await?;
        Ok(payload.into_text())
    }
}
