use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

/// CLI arguments for cardex-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub config_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub persist_output: Option<bool>,
    pub max_request_size: Option<usize>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Self::command().get_matches();

        // Handle special help for environment variables
        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self::from_matches(&matches)
    }

    /// Parse from an explicit argument list (the first item is the binary name)
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    fn command() -> Command {
        Command::new("cardex-server")
            .version(cardex::VERSION)
            .about("HTTP server that extracts treatment-card fields from uploaded images")
            .long_about(
                r#"Cardex Server accepts a treatment-card image on POST /extract-data,
forwards it to a hosted vision-language model together with a fixed extraction
prompt, and returns the model's JSON answer.

The inference API key is read from GROQ_API_KEY at startup. Other settings can
be given as command line arguments, environment variables or a config file.
Command line arguments take precedence over environment variables.

Examples:
  cardex-server --port 8080
  cardex-server --config cardex.toml --output /var/lib/cardex/last.json
  cardex-server --no-output --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: CARDEX_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON configuration file. Without it,
cardex.toml / cardex.yaml / cardex.json in the working directory are tried.
Environment variable: CARDEX_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .help("File overwritten with the latest extraction")
                    .long_help(
                        "Every successful extraction is written to this file as
indented JSON, replacing the previous contents. Default: output.json
Environment variable: CARDEX_OUTPUT_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("no_output")
                    .long("no-output")
                    .help("Do not write extractions to disk")
                    .long_help(
                        "Disable output persistence entirely.
Environment variable: CARDEX_PERSIST_OUTPUT=false",
                    )
                    .action(ArgAction::SetTrue)
                    .conflicts_with("output"),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Larger uploads are rejected with 413.
Environment variable: CARDEX_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            port: matches.get_one::<u16>("port").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            output_file: matches.get_one::<PathBuf>("output").cloned(),
            persist_output: if matches.get_flag("no_output") {
                Some(false)
            } else {
                None
            },
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Cardex Server Environment Variables");
        println!("===================================");
        println!();
        println!("Required:");
        println!("  GROQ_API_KEY                  - Inference API credential");
        println!();
        println!("Server Configuration:");
        println!("  CARDEX_PORT                   - Server port (default: 5000)");
        println!(
            "  CARDEX_MAX_REQUEST_SIZE       - Max request body size in bytes (default: 16MB)"
        );
        println!("  CARDEX_CONFIG_FILE            - Path to config file");
        println!("  CARDEX_OUTPUT_FILE            - Latest-extraction file (default: output.json)");
        println!("  CARDEX_PERSIST_OUTPUT         - Write extractions to disk (default: true)");
        println!();
        println!("Library Configuration (nested keys use a double underscore):");
        println!(
            "  CARDEX_INFERENCE__BASE_URL    - API base URL (default: https://api.groq.com/openai/v1)"
        );
        println!("  CARDEX_LOGGING__FORMAT        - default, pretty, compact or json");
        println!("  CARDEX_LOGGING__FILE          - Log to this file instead of stdout");
        println!();
        println!("Logging:");
        println!(
            "  RUST_LOG                      - Logging level (error, warn, info, debug, trace)"
        );
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
