//! Upstream vision-language inference.
//!
//! [`VisionClient`] is the seam between the extraction pipeline and whatever
//! answers the prompt. [`GroqClient`] talks to Groq's OpenAI-compatible
//! chat-completions API.

mod groq;
pub mod types;

use async_trait::async_trait;

use crate::{Result, encoding::ImagePayload, prompt::EXTRACTION_PROMPT};

pub use groq::GroqClient;

/// Fixed invocation parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatParameters {
    pub model: &'static str,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

impl ChatParameters {
    /// The parameters used for card extraction.
    pub const FIXED: ChatParameters = ChatParameters {
        model: "llama-3.2-90b-vision-preview",
        temperature: 0.5,
        max_completion_tokens: 1024,
        top_p: 1.0,
        stream: false,
    };
}

impl Default for ChatParameters {
    fn default() -> Self {
        Self::FIXED
    }
}

/// One prompt + image pair to send upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub prompt: String,
    pub image: ImagePayload,
}

impl ExtractionRequest {
    /// Pair an image with the standard extraction prompt.
    pub fn new(image: ImagePayload) -> Self {
        Self {
            prompt: EXTRACTION_PROMPT.to_string(),
            image,
        }
    }
}

/// Something that can answer an extraction request with the model's raw text.
#[async_trait]
pub trait VisionClient: Send + Sync + std::fmt::Debug {
    /// Send the request and return the model's message content verbatim.
    async fn complete(&self, request: &ExtractionRequest) -> Result<String>;

    /// Name of the backing provider, used in logs and health output.
    fn name(&self) -> &str;

    /// Model identifier requested from the provider.
    fn model(&self) -> &str {
        ChatParameters::FIXED.model
    }
}
