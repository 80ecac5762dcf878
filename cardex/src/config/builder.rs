//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;

/// Builder for creating CardexConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: CardexConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: CardexConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: CardexConfig) -> Self {
        Self { config }
    }

    /// Set the inference API credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.inference.api_key = Some(api_key.into());
        self
    }

    /// Point the inference client at a different API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.inference.base_url = base_url.into();
        self
    }

    /// Set the file each extraction is written to, enabling persistence.
    pub fn with_output_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output.enabled = true;
        self.config.output.path = path.as_ref().to_path_buf();
        self
    }

    /// Turn off output persistence.
    pub fn without_output(mut self) -> Self {
        self.config.output.enabled = false;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<CardexConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
