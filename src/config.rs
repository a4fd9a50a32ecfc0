//! Configuration module for Unify Mail.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, UnimailError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Runtime mode ("production" suppresses error details in responses).
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_environment() -> String {
    "development".to_string()
}

impl ServerConfig {
    /// Whether the service runs in production mode.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
        }
    }
}

/// SMTP transport configuration.
///
/// Username, password, and sender address have no defaults; startup fails
/// when they are missing (see [`Config::validate`]).
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Username for SMTP authentication.
    #[serde(default)]
    pub username: String,
    /// Password for SMTP authentication.
    #[serde(default)]
    pub password: String,
    /// Sender address stamped on outbound mail.
    #[serde(default)]
    pub from: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout() -> u64 {
    10
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: String::new(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/unimail.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// SMTP transport configuration.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| UnimailError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `UNIMAIL_SMTP_USERNAME`: Override the SMTP username
    /// - `UNIMAIL_SMTP_PASSWORD`: Override the SMTP password
    /// - `UNIMAIL_SMTP_FROM`: Override the sender address
    /// - `UNIMAIL_ENVIRONMENT`: Override the runtime mode
    pub fn apply_env_overrides(&mut self) {
        if let Ok(username) = std::env::var("UNIMAIL_SMTP_USERNAME") {
            if !username.is_empty() {
                self.smtp.username = username;
            }
        }
        if let Ok(password) = std::env::var("UNIMAIL_SMTP_PASSWORD") {
            if !password.is_empty() {
                self.smtp.password = password;
            }
        }
        if let Ok(from) = std::env::var("UNIMAIL_SMTP_FROM") {
            if !from.is_empty() {
                self.smtp.from = from;
            }
        }
        if let Ok(environment) = std::env::var("UNIMAIL_ENVIRONMENT") {
            if !environment.is_empty() {
                self.server.environment = environment;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if any of the SMTP username, password, or sender
    /// address is missing. There are no built-in credential fallbacks; the
    /// process must refuse to start without them.
    pub fn validate(&self) -> Result<()> {
        if self.smtp.username.is_empty() {
            return Err(UnimailError::Config(
                "smtp.username is not set. \
                 Set it in config.toml or via UNIMAIL_SMTP_USERNAME environment variable."
                    .to_string(),
            ));
        }
        if self.smtp.password.is_empty() {
            return Err(UnimailError::Config(
                "smtp.password is not set. \
                 Set it in config.toml or via UNIMAIL_SMTP_PASSWORD environment variable."
                    .to_string(),
            ));
        }
        if self.smtp.from.is_empty() {
            return Err(UnimailError::Config(
                "smtp.from is not set. \
                 Set it in config.toml or via UNIMAIL_SMTP_FROM environment variable."
                    .to_string(),
            ));
        }
        Ok(())
    }
}
