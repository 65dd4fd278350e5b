use std::time::Duration;

use atomizer_logging::{atom_debug, atom_info, atom_warn};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::fetch::USER_AGENT;
use crate::CompletionError;

pub const DEFAULT_COMPLETION_API: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_COMPLETION_API.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Some(Duration::from_secs(120)),
        }
    }
}

/// One chat turn sent to the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// A completion backend that answers with a single JSON object.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the raw message content of the first choice.
    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for OpenAI-compatible `chat/completions` endpoints.
///
/// Owns its credential for its whole lifetime; constructing it without one
/// fails immediately with [`CompletionError::CredentialMissing`].
#[derive(Clone)]
pub struct OpenAiClient {
    settings: CompletionSettings,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CompletionError::CredentialMissing)?
            .to_string();

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| CompletionError::Network(err.to_string()))?;

        Ok(Self {
            settings,
            api_key,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.settings.base_url)
            .field("model", &self.settings.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete_json(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let body = serde_json::to_vec(&request)
            .map_err(|err| CompletionError::Network(format!("failed to encode request: {err}")))?;

        atom_info!(
            "Sending completion request model={} messages={}",
            self.settings.model,
            messages.len()
        );
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| CompletionError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            atom_warn!("Completion API returned {}: {}", status, message);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| CompletionError::Network(err.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_slice(&bytes).map_err(|err| CompletionError::Api {
                status: status.as_u16(),
                message: format!("unexpected response body: {err}"),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyCompletion)?;
        atom_debug!(
            "Raw completion: {}",
            atomizer_logging::excerpt(&content, 500)
        );
        Ok(content)
    }
}
