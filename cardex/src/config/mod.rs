//! Configuration system for cardex.
//!
//! Configuration is layered from defaults, an optional file, `CARDEX_`-prefixed
//! environment variables and finally the upstream credential in `GROQ_API_KEY`.

mod builder;
mod loader;
mod models;
#[cfg(test)]
mod tests;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;
pub use validation::validate_config;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "cardex.toml",
    "cardex.yaml",
    "cardex.yml",
    "cardex.json",
    ".cardex/config.toml",
    ".cardex/config.yaml",
    ".cardex/config.yml",
    ".cardex/config.json",
];

/// Environment variable prefix for cardex configuration
pub const ENV_PREFIX: &str = "CARDEX_";

/// Environment variable holding the inference API credential
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
