//! # Cardex
//!
//! Structured field extraction from patient treatment-card images. The heavy
//! lifting (OCR, field extraction, spelling normalization) is delegated to a
//! hosted vision-language model; this crate marshals the request and relays
//! the model's JSON answer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cardex::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new()
//!         .with_api_key("gsk_...")
//!         .build()?;
//!     let extractor = Extractor::from_config(&config)?;
//!
//!     let image = std::fs::read("card.jpg")?;
//!     let result = extractor.extract(&image, Some("image/jpeg")).await?;
//!     println!("{}", result.get_str("name").unwrap_or("<unknown>"));
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **encoding**: image bytes to a base64 data URL
//! - **prompt**: the fixed extraction instructions
//! - **inference**: one chat-completion call through a [`inference::VisionClient`]
//! - **extraction**: parse the model output and relay it
//! - **output**: best-effort persistence of the latest result

pub mod config;
pub mod encoding;
pub mod extraction;
pub mod inference;
pub mod logging;
pub mod output;
pub mod prompt;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{CardexConfig, ConfigBuilder, ConfigLoader, LogLevel};
    pub use crate::encoding::ImagePayload;
    pub use crate::extraction::{ExtractionResult, Extractor};
    pub use crate::inference::{ExtractionRequest, GroqClient, VisionClient};
    pub use crate::output::OutputSink;
    pub use crate::{CardexError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for cardex operations
#[derive(Debug, thiserror::Error)]
pub enum CardexError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// The uploaded image contained no bytes
    #[error("Image payload is empty")]
    EmptyImage,

    /// Transport-level failure talking to the inference API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The inference API answered with a non-success status
    #[error("Inference API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The inference API answered 2xx but without usable content
    #[error("Malformed inference response: {0}")]
    MalformedResponse(String),

    /// The model's answer was not a JSON object
    #[error("Model output is not valid JSON: {0}")]
    InvalidModelOutput(#[from] serde_json::Error),

    /// Writing the output file failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for CardexError {
    fn from(err: crate::config::ConfigError) -> Self {
        CardexError::Configuration(err.to_string())
    }
}

impl CardexError {
    /// Short machine-readable name for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            CardexError::Configuration(_) => "configuration_error",
            CardexError::Logging(_) => "logging_error",
            CardexError::EmptyImage => "empty_image",
            CardexError::Http(_) => "upstream_unreachable",
            CardexError::Upstream { .. } => "upstream_error",
            CardexError::MalformedResponse(_) => "malformed_upstream_response",
            CardexError::InvalidModelOutput(_) => "invalid_model_output",
            CardexError::Output(_) => "output_error",
            CardexError::Other(_) => "internal_error",
        }
    }
}

/// Result type for cardex operations
pub type Result<T> = std::result::Result<T, CardexError>;
