//! The extraction pipeline: encode, infer, parse, persist.

mod result;

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    config::CardexConfig,
    encoding::ImagePayload,
    inference::{ExtractionRequest, GroqClient, VisionClient},
    output::OutputSink,
};

pub use result::{ExtractionResult, FieldWarning};

/// Runs one image through the model and relays the parsed answer.
///
/// Cheap to share: the client is behind an `Arc` and no per-request state is
/// kept between calls.
#[derive(Debug, Clone)]
pub struct Extractor {
    client: Arc<dyn VisionClient>,
    output: Option<OutputSink>,
}

impl Extractor {
    /// Create an extractor with no output persistence.
    pub fn new(client: Arc<dyn VisionClient>) -> Self {
        Self {
            client,
            output: None,
        }
    }

    /// Build the production extractor: Groq client plus the configured output file.
    pub fn from_config(config: &CardexConfig) -> Result<Self> {
        let client = GroqClient::from_config(&config.inference)?;
        let extractor = Self::new(Arc::new(client));

        Ok(if config.output.enabled {
            extractor.with_output(OutputSink::new(&config.output.path))
        } else {
            extractor
        })
    }

    /// Persist every successful result through `sink`.
    pub fn with_output(mut self, sink: OutputSink) -> Self {
        self.output = Some(sink);
        self
    }

    pub fn client(&self) -> &dyn VisionClient {
        self.client.as_ref()
    }

    pub fn output(&self) -> Option<&OutputSink> {
        self.output.as_ref()
    }

    /// Extract the card fields from `image`.
    ///
    /// Encoding, upstream and parse failures are returned as errors. Output
    /// persistence is best-effort: a failed write is logged and the result is
    /// still returned.
    #[instrument(skip(self, image), fields(provider = self.client.name(), bytes = image.len()))]
    pub async fn extract(&self, image: &[u8], mime_type: Option<&str>) -> Result<ExtractionResult> {
        let payload = ImagePayload::encode(image, mime_type)?;
        let request = ExtractionRequest::new(payload);

        let content = self.client.complete(&request).await?;
        debug!(content_len = content.len(), "Received model output");

        let result = ExtractionResult::parse(&content)?;
        if !result.is_object() {
            warn!(
                kind = result.json_kind(),
                "Model output is not a JSON object; relaying it unchanged"
            );
        }

        for warning in result.check_enumerations() {
            warn!(
                field = warning.field,
                value = %warning.value,
                allowed = ?warning.allowed,
                "Model returned a value outside the expected set"
            );
        }
        let missing = result.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "Model output omits expected fields");
        }

        if let Some(sink) = &self.output
            && let Err(e) = sink.write(&result).await
        {
            warn!(path = %sink.path().display(), "Failed to persist extraction result: {}", e);
        }

        info!(fields = result.len(), "Extraction complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardexError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a canned answer and remembers what it was asked.
    #[derive(Debug)]
    struct CannedClient {
        answer: String,
        seen: Mutex<Vec<ExtractionRequest>>,
    }

    impl CannedClient {
        fn new(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl VisionClient for CannedClient {
        async fn complete(&self, request: &ExtractionRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.answer.clone())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn extract_relays_model_output_and_persists_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        let client = CannedClient::new(r#"{"name": "Asha", "leprosy_type": "PB"}"#);
        let extractor = Extractor::new(client.clone()).with_output(OutputSink::new(&path));

        let result = extractor.extract(b"jpeg bytes", None).await.unwrap();
        assert_eq!(result.get_str("name"), Some("Asha"));

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].image.decode().unwrap(), b"jpeg bytes");
        assert_eq!(seen[0].prompt, crate::prompt::EXTRACTION_PROMPT);

        let written: ExtractionResult =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, result);
    }

    #[tokio::test]
    async fn extract_fails_on_non_json_output() {
        let extractor = Extractor::new(CannedClient::new("I could not read this card."));
        let err = extractor.extract(b"img", None).await.unwrap_err();
        assert!(matches!(err, CardexError::InvalidModelOutput(_)));
    }

    #[tokio::test]
    async fn extract_relays_non_object_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        let extractor = Extractor::new(CannedClient::new(r#"[{"name": "Asha"}]"#))
            .with_output(OutputSink::new(&path));

        let result = extractor.extract(b"img", None).await.unwrap();
        assert_eq!(result.as_value(), &serde_json::json!([{ "name": "Asha" }]));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(&written, result.as_value());
    }

    #[tokio::test]
    async fn extract_rejects_empty_image_before_calling_upstream() {
        let client = CannedClient::new("{}");
        let extractor = Extractor::new(client.clone());
        let err = extractor.extract(&[], None).await.unwrap_err();

        assert!(matches!(err, CardexError::EmptyImage));
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn persistence_failure_does_not_fail_extraction() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be replaced by a file rename
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();

        let extractor = Extractor::new(CannedClient::new(r#"{"name": null}"#))
            .with_output(OutputSink::new(&target));
        let result = extractor.extract(b"img", None).await.unwrap();
        assert!(result.is_absent("name"));
    }

    #[test]
    fn from_config_honours_disabled_output() {
        let config = crate::config::ConfigBuilder::new()
            .with_api_key("k")
            .without_output()
            .build()
            .unwrap();
        let extractor = Extractor::from_config(&config).unwrap();
        assert!(extractor.output().is_none());
        assert_eq!(extractor.client().name(), "groq");
    }
}
