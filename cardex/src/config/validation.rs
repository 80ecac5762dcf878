//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &CardexConfig) -> Result<(), ConfigError> {
    validate_inference_config(&config.inference)?;
    validate_output_config(&config.output)?;

    Ok(())
}

/// Validate the upstream API configuration.
fn validate_inference_config(config: &InferenceConfig) -> Result<(), ConfigError> {
    match config.api_key.as_deref().map(str::trim) {
        None | Some("") => {
            return Err(ConfigError::ValidationError(format!(
                "API key is required; set {}",
                super::API_KEY_ENV
            )));
        }
        Some(_) => {}
    }

    let base_url = config.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Inference base URL cannot be empty".to_string(),
        ));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "Inference base URL must be http(s): {}",
            base_url
        )));
    }

    Ok(())
}

/// Validate output persistence configuration.
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.enabled && config.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Output path cannot be empty when output persistence is enabled".to_string(),
        ));
    }

    Ok(())
}
