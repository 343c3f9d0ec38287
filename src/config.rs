//! Command-line and environment configuration for the shell.
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqwest::Url;

use fb_base::config::{DEFAULT_THEME, THEME_ORDER};

/// API base URL used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080/";

/// Diagnostic log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = ".file-browser/file-browser.log";

#[derive(Debug, Parser)]
#[command(name = "file-browser", version, about = "Browse a remote file system, one directory at a time")]
pub struct Cli {
    /// Base URL of the file-system API; requests go to `{api_url}fs?path=...`
    #[arg(long, env = "FILE_BROWSER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "FILE_BROWSER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Color theme
    #[arg(
        long,
        env = "FILE_BROWSER_THEME",
        default_value = DEFAULT_THEME,
        value_parser = clap::builder::PossibleValuesParser::new(THEME_ORDER.iter().copied())
    )]
    pub theme: String,

    #[arg(long, env = "FILE_BROWSER_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, env = "FILE_BROWSER_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Trace => Some(tracing::Level::TRACE),
        }
    }
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub timeout: Option<Duration>,
    pub theme: String,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(&cli.api_url)?,
            timeout: cli.timeout_secs.map(Duration::from_secs),
            theme: cli.theme,
            log_level: cli.log_level,
            log_file: cli.log_file,
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidApiUrl { url: String, reason: String },
    UnsupportedScheme(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiUrl { url, reason } => write!(f, "invalid API URL '{}': {}", url, reason),
            ConfigError::UnsupportedScheme(scheme) => {
                write!(f, "unsupported API URL scheme '{}' (expected http or https)", scheme)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse the API base URL and make sure `fs` resolves beneath it.
pub fn normalize_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidApiUrl { url: raw.to_string(), reason: e.to_string() })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
