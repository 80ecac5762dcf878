//! Server configuration module

use anyhow::Result;
use cardex::config::CardexConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::cli::CliArgs;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// Library configuration file, if one was given explicitly
    pub config_file_path: Option<PathBuf>,

    /// Override for the latest-extraction output file
    pub output_file: Option<PathBuf>,

    /// Override for whether extractions are written to disk
    pub persist_output: Option<bool>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            max_request_size: 16 * 1024 * 1024, // 16MB
            config_file_path: None,
            output_file: None,
            persist_output: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("CARDEX_PORT") {
            config.port = port.parse()?;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Ok(max_size) = env::var("CARDEX_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size.parse()?;
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file_path = Some(config_path);
        } else if let Ok(config_path) = env::var("CARDEX_CONFIG_FILE") {
            config.config_file_path = Some(PathBuf::from(config_path));
        }

        if let Some(output_file) = cli_args.output_file {
            config.output_file = Some(output_file);
        } else if let Ok(output_file) = env::var("CARDEX_OUTPUT_FILE") {
            config.output_file = Some(PathBuf::from(output_file));
        }

        if let Some(persist) = cli_args.persist_output {
            config.persist_output = Some(persist);
        } else if let Ok(persist) = env::var("CARDEX_PERSIST_OUTPUT") {
            config.persist_output = Some(parse_flag("CARDEX_PERSIST_OUTPUT", &persist)?);
        }

        Ok(config)
    }

    /// Apply the server-level overrides to the library configuration
    pub fn apply_to(&self, config: &mut CardexConfig) {
        if let Some(path) = &self.output_file {
            config.output.path = path.clone();
            config.output.enabled = true;
        }
        if let Some(persist) = self.persist_output {
            config.output.enabled = persist;
        }
    }
}

/// Parse a boolean environment value such as `true`, `0` or `no`.
fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!(
            "{} must be a boolean (true/false, 1/0, yes/no), got {:?}",
            name,
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        for off in ["0", "false", "No", " off "] {
            assert!(!parse_flag("CARDEX_PERSIST_OUTPUT", off).unwrap());
        }
        for on in ["1", "TRUE", "yes", "on"] {
            assert!(parse_flag("CARDEX_PERSIST_OUTPUT", on).unwrap());
        }

        let err = parse_flag("CARDEX_PERSIST_OUTPUT", "sometimes").unwrap_err();
        assert!(err.to_string().contains("CARDEX_PERSIST_OUTPUT"));
    }

    #[test]
    fn cli_values_are_used() {
        let cli = CliArgs {
            port: Some(9000),
            max_request_size: Some(512),
            output_file: Some(PathBuf::from("cards/last.json")),
            ..Default::default()
        };

        let config = ServerConfig::from_cli_and_env(cli).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_request_size, 512);
        assert_eq!(config.output_file, Some(PathBuf::from("cards/last.json")));
    }

    #[test]
    fn apply_to_overrides_output_settings() {
        let mut library = CardexConfig::default();
        let server = ServerConfig {
            output_file: Some(PathBuf::from("elsewhere.json")),
            ..Default::default()
        };
        server.apply_to(&mut library);
        assert!(library.output.enabled);
        assert_eq!(library.output.path, PathBuf::from("elsewhere.json"));

        let server = ServerConfig {
            persist_output: Some(false),
            ..Default::default()
        };
        server.apply_to(&mut library);
        assert!(!library.output.enabled);
    }

    #[test]
    fn defaults_leave_library_config_alone() {
        let mut library = CardexConfig::default();
        ServerConfig::default().apply_to(&mut library);
        assert!(library.output.enabled);
        assert_eq!(library.output.path, PathBuf::from("output.json"));
    }
}
