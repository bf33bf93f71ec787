//! OpenAI-compatible Provider - Implementation of AIProvider for any
//! chat-completion endpoint speaking the OpenAI wire format.
//!
//! # Configuration
//!
//! ```ignore
//! let settings = app_config.ai.validate()?;
//! let provider = OpenAIProvider::new(OpenAIConfig::from_settings(&settings));
//! ```
//!
//! The configured endpoint is the full URL; nothing is appended to it. Each
//! call is a single POST with no retry and no client-side timeout.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::{AiConfig, AiSettings, ValidationError};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo,
};

/// Content used when the envelope carries no message text.
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "No content was returned by the model.";

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to request.
    pub model: String,
    /// Full chat-completion URL.
    pub endpoint: String,
}

impl OpenAIConfig {
    /// Creates a new configuration.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a configuration from validated settings.
    pub fn from_settings(settings: &AiSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
        }
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Validates the AI settings and builds a provider from them.
    ///
    /// Every missing setting is reported at once.
    pub fn from_config(config: &AiConfig) -> Result<Self, ValidationError> {
        let settings = config.validate()?;
        Ok(Self::new(OpenAIConfig::from_settings(&settings)))
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(prompt.clone()),
            });
        }

        for msg in &request.messages {
            messages.push(OpenAIMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                }
                .to_string(),
                content: Some(msg.content.clone()),
            });
        }

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
        }
    }

    /// Sends the request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Any non-2xx status is a failure carrying the body text.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(AIError::http(status.as_u16(), error_body))
    }

    /// Parses a successful response body.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| AIError::network(format!("Failed to read response: {}", e)))?;

        parse_envelope(&body, &self.config.model)
    }
}

/// Extracts `choices[0].message.content`, trimmed. A decodable envelope
/// without content yields the placeholder text rather than an error.
fn parse_envelope(body: &str, requested_model: &str) -> Result<CompletionResponse, AIError> {
    let envelope: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

    let choice = envelope.choices.into_iter().next();
    let finish_reason = choice
        .as_ref()
        .and_then(|c| c.finish_reason.as_deref())
        .map(FinishReason::from_provider);

    let content = choice
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| EMPTY_CONTENT_PLACEHOLDER.to_string());

    Ok(CompletionResponse {
        content,
        model: envelope
            .model
            .unwrap_or_else(|| requested_model.to_string()),
        finish_reason,
    })
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let trace_id = request.metadata.trace_id.clone();
        tracing::debug!(
            trace_id = %trace_id,
            model = %self.config.model,
            endpoint = %self.config.endpoint,
            "Sending completion request"
        );

        let response = self.send_request(&request).await?;
        tracing::debug!(trace_id = %trace_id, status = %response.status(), "Completion response received");

        let completion = self.parse_response(response).await;
        if let Err(ref err) = completion {
            tracing::warn!(trace_id = %trace_id, error = %err, "Completion request failed");
        }
        completion
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai-compatible", &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    #[serde(default)]
    message: Option<OpenAIMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}
