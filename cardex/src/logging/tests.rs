use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{LogError, parse_log_level};

#[test]
fn init_is_idempotent() {
    let config = LoggingConfig {
        level: LogLevel::Debug,
        format: LogFormat::Compact,
        file: None,
        stdout: true,
    };

    // Whichever call installs the subscriber, neither hands back a file guard
    assert!(crate::logging::init(&config).unwrap().is_none());
    assert!(crate::logging::init(&config).unwrap().is_none());
}

#[test]
fn parse_accepts_any_case() {
    assert_eq!(parse_log_level("TRACE").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level(" warn ").unwrap(), LogLevel::Warn);
    assert!(matches!(
        parse_log_level("chatty"),
        Err(LogError::InvalidLogLevel(level)) if level == "chatty"
    ));
}
