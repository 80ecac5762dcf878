use crate::config::{
    CardexConfig, ConfigBuilder, ConfigError, ConfigLoader, DEFAULT_API_BASE_URL, LogFormat,
    LogLevel, validation,
};
use figment::Jail;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = CardexConfig::default();
    assert_eq!(config.inference.base_url, DEFAULT_API_BASE_URL);
    assert!(config.inference.api_key.is_none());
    assert!(config.output.enabled);
    assert_eq!(config.output.path, PathBuf::from("output.json"));
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn test_config_builder() {
    let config = ConfigBuilder::new()
        .with_api_key("test-key")
        .with_base_url("http://127.0.0.1:9999/v1")
        .with_output_file("/tmp/cardex/last.json")
        .with_log_level(LogLevel::Debug)
        .with_log_format(LogFormat::Compact)
        .build()
        .unwrap();

    assert_eq!(config.inference.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.inference.base_url, "http://127.0.0.1:9999/v1");
    assert_eq!(config.output.path, PathBuf::from("/tmp/cardex/last.json"));
    assert_eq!(config.logging.level, LogLevel::Debug);
    assert_eq!(config.logging.format, LogFormat::Compact);
}

#[test]
fn test_missing_api_key_is_rejected() {
    let result = ConfigBuilder::new().build();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    let blank = ConfigBuilder::new().with_api_key("   ").build();
    assert!(matches!(blank, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_validation_rejects_bad_base_url() {
    let result = ConfigBuilder::new()
        .with_api_key("k")
        .with_base_url("ftp://example.org")
        .build();
    assert!(result.is_err());
}

#[test]
fn test_disabled_output_allows_empty_path() {
    let mut config = ConfigBuilder::new().with_api_key("k").build().unwrap();
    config.output.enabled = false;
    config.output.path = PathBuf::new();
    assert!(validation::validate_config(&config).is_ok());

    config.output.enabled = true;
    assert!(validation::validate_config(&config).is_err());
}

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cardex.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[inference]
api_key = "from-file"
base_url = "http://localhost:8080/v1"

[output]
enabled = false

[logging]
level = "warn"
format = "json"
"#
    )
    .unwrap();

    let mut loader = ConfigLoader::new();
    loader.load_file(&path).unwrap();
    let config = loader.extract().unwrap();

    assert_eq!(config.inference.api_key.as_deref(), Some("from-file"));
    assert_eq!(config.inference.base_url, "http://localhost:8080/v1");
    assert!(!config.output.enabled);
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_missing_or_unsupported_file() {
    let mut loader = ConfigLoader::new();
    assert!(matches!(
        loader.load_file("/definitely/not/here.toml"),
        Err(ConfigError::FileLoadError(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cardex.ini");
    std::fs::write(&path, "api_key = nope").unwrap();
    assert!(matches!(
        loader.load_file(&path),
        Err(ConfigError::FileLoadError(_))
    ));

    // The loader is still usable after a rejected file
    assert!(loader.extract_unvalidated().is_ok());
}

#[test]
fn test_config_serialization() {
    let config = ConfigBuilder::new()
        .with_api_key("k")
        .with_output_file("result.json")
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: CardexConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config.output.path, deserialized.output.path);
    assert_eq!(config.inference.base_url, deserialized.inference.base_url);
}

#[test]
fn test_log_level_from_str() {
    assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    assert!("verbose".parse::<LogLevel>().is_err());
    assert_eq!(LogLevel::Warn.to_string(), "warn");
}

#[test]
fn test_env_supplies_credential_and_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("GROQ_API_KEY", "gsk_from_env");
        jail.set_env("CARDEX_OUTPUT__PATH", "cards/last.json");
        jail.set_env("CARDEX_INFERENCE__BASE_URL", "http://localhost:9000/v1");

        let mut loader = ConfigLoader::new();
        let config = loader.load_env().extract().unwrap();

        assert_eq!(config.inference.api_key.as_deref(), Some("gsk_from_env"));
        assert_eq!(config.inference.base_url, "http://localhost:9000/v1");
        assert_eq!(config.output.path, PathBuf::from("cards/last.json"));
        assert!(config.output.enabled);
        Ok(())
    });
}

#[test]
fn test_env_overrides_default_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "cardex.toml",
            r#"
[inference]
api_key = "from-file"

[output]
path = "file.json"
"#,
        )?;
        jail.set_env("GROQ_API_KEY", "gsk_from_env");

        let mut loader = ConfigLoader::new();
        let config = loader.load_default_files().load_env().extract().unwrap();

        assert_eq!(config.inference.api_key.as_deref(), Some("gsk_from_env"));
        assert_eq!(config.output.path, PathBuf::from("file.json"));
        Ok(())
    });
}

#[test]
fn test_missing_env_credential_fails_validation() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let mut loader = ConfigLoader::new();
        let result = loader.load_env().extract();

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        Ok(())
    });
}
