use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default Gemini API base URL used when `GEMINI_BASE_URL` is not set.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model used for summarization.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Default MailerSend API base URL used when `MAILERSEND_BASE_URL` is not set.
pub const DEFAULT_MAILERSEND_BASE_URL: &str = "https://api.mailersend.com/v1";

/// Wildcard entry in `allowed_origins` that permits any origin.
pub const ANY_ORIGIN: &str = "*";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that are allowed to receive server responses.
    /// A single `*` allows any origin.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = ANY_ORIGIN
    )]
    pub allowed_origins: Vec<String>,

    /// The API key to use when calling the Gemini generateContent API.
    #[arg(long, env, hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// The base URL of the Gemini API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// The Gemini model used to generate summaries.
    #[arg(long, env, default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// The sender address summaries are emailed from.
    #[arg(long, env)]
    email_user: Option<String>,

    /// The API token used to authenticate with the mail relay.
    #[arg(long, env, hide_env_values = true)]
    email_pass: Option<String>,

    /// The base URL of the MailerSend API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_MAILERSEND_BASE_URL)]
    mailersend_base_url: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 5000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the Gemini API key, if configured.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini_api_key.clone()
    }

    pub fn set_gemini_api_key(mut self, api_key: Option<String>) -> Self {
        self.gemini_api_key = api_key;
        self
    }

    /// Returns the Gemini API base URL.
    pub fn gemini_base_url(&self) -> &str {
        &self.gemini_base_url
    }

    pub fn set_gemini_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gemini_base_url = base_url.into();
        self
    }

    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }

    /// Returns the sender address used for outgoing summary emails, if configured.
    pub fn email_user(&self) -> Option<String> {
        self.email_user.clone()
    }

    pub fn set_email_user(mut self, email_user: Option<String>) -> Self {
        self.email_user = email_user;
        self
    }

    /// Returns the mail relay API token, if configured.
    pub fn email_pass(&self) -> Option<String> {
        self.email_pass.clone()
    }

    pub fn set_email_pass(mut self, email_pass: Option<String>) -> Self {
        self.email_pass = email_pass;
        self
    }

    /// Returns the MailerSend API base URL.
    pub fn mailersend_base_url(&self) -> &str {
        &self.mailersend_base_url
    }

    pub fn set_mailersend_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.mailersend_base_url = base_url.into();
        self
    }

    /// True when `allowed_origins` contains the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == ANY_ORIGIN)
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["meeting_notes_relay"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn test_rust_env_from_str_is_case_insensitive() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("Development".parse::<RustEnv>(), Ok(RustEnv::Development));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }

    #[test]
    fn test_command_line_flags_override_defaults() {
        let config = parse(&[
            "--port",
            "8080",
            "--gemini-model",
            "gemini-1.5-flash",
            "--allowed-origins",
            "http://localhost:3000,https://notes.example.com",
            "--runtime-env",
            "production",
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini_model(), "gemini-1.5-flash");
        assert_eq!(
            config.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://notes.example.com".to_string()
            ]
        );
        assert!(!config.allows_any_origin());
        assert!(config.is_production());
    }

    #[test]
    fn test_wildcard_origin_allows_any_origin() {
        let config = parse(&["--allowed-origins", "*"]);
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_setters_replace_secrets_and_endpoints() {
        let config = parse(&[])
            .set_gemini_api_key(Some("gemini-key".to_string()))
            .set_gemini_base_url("http://127.0.0.1:1234")
            .set_email_user(Some("notes@example.com".to_string()))
            .set_email_pass(None)
            .set_mailersend_base_url("http://127.0.0.1:5678/v1");

        assert_eq!(config.gemini_api_key().as_deref(), Some("gemini-key"));
        assert_eq!(config.gemini_base_url(), "http://127.0.0.1:1234");
        assert_eq!(config.email_user().as_deref(), Some("notes@example.com"));
        assert!(config.email_pass().is_none());
        assert_eq!(config.mailersend_base_url(), "http://127.0.0.1:5678/v1");
    }
}
