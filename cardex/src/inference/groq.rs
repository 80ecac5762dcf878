//! Groq chat-completions client.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart,
    ImageUrl, ResponseFormat,
};
use super::{ChatParameters, ExtractionRequest, VisionClient};
use crate::config::InferenceConfig;
use crate::{CardexError, Result};

/// Client for Groq's OpenAI-compatible API.
///
/// One request per call: no retries, and no timeout beyond the transport's.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    parameters: ChatParameters,
}

impl GroqClient {
    /// Create a client for `base_url` (e.g. `https://api.groq.com/openai/v1`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cardex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            parameters: ChatParameters::FIXED,
        })
    }

    /// Create a client from configuration. The API key must be present.
    pub fn from_config(config: &InferenceConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CardexError::Configuration("API key is not set".to_string()))?;

        Self::new(&config.base_url, api_key)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the wire request: one user message with the prompt then the image.
    pub fn build_request(&self, request: &ExtractionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.parameters.model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: request.prompt.clone(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: request.image.data_url(),
                        },
                    },
                ],
            }],
            temperature: self.parameters.temperature,
            max_completion_tokens: self.parameters.max_completion_tokens,
            top_p: self.parameters.top_p,
            stream: self.parameters.stream,
            response_format: ResponseFormat::json_object(),
        }
    }
}

#[async_trait]
impl VisionClient for GroqClient {
    async fn complete(&self, request: &ExtractionRequest) -> Result<String> {
        let body = self.build_request(request);
        debug!(
            model = %body.model,
            mime_type = %request.image.mime_type(),
            payload_len = request.image.base64().len(),
            "Sending chat completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = upstream_error_message(&text);
            warn!(status = status.as_u16(), "Inference API request failed: {}", message);
            return Err(CardexError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| CardexError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CardexError::MalformedResponse("response has no message content".to_string())
            })
    }

    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        self.parameters.model
    }
}

/// Pull the human-readable message out of an error body, if it has one.
fn upstream_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.error.kind {
            Some(kind) => format!("{} ({})", parsed.error.message, kind),
            None => parsed.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
