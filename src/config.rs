//! Server configuration.
//!
//! Configuration is an explicitly constructed object handed to the token
//! issuer, mailer, and HTTP state at startup. It is read once from an
//! optional YAML file, then overridden by `HUDDLE_*` environment variables;
//! there is no ambient global state and no hot reload.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default port for the HTTP API.
pub const DEFAULT_PORT: u16 = 8000;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database: PathBuf,

    /// Port for the HTTP API (default: 8000).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public host used when building invitation links, e.g. "app.huddle.io".
    #[serde(default = "default_public_host")]
    pub public_host: String,

    /// Process-wide secret used to sign invitation tokens.
    #[serde(default)]
    pub signing_secret: String,

    /// Invitation token lifetime in hours (default: 24).
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Outbound email settings.
    #[serde(default)]
    pub mail: MailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            port: default_port(),
            public_host: default_public_host(),
            signing_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            mail: MailConfig::default(),
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("huddle")
        .join("huddle.db")
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_public_host() -> String {
    "localhost:8000".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

/// SMTP settings for the notification dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Sender identity on outbound mail.
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// SMTP relay hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port (default: 587, STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: String,

    #[serde(default)]
    pub smtp_password: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_email: default_from_email(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
        }
    }
}

fn default_from_email() -> String {
    "hudddle.ioo@gmail.com".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Config {
    /// Load configuration from an optional YAML file, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                serde_yaml::from_str(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `HUDDLE_*` environment variable overrides (highest priority).
    fn apply_env_overrides(&mut self) {
        if let Ok(database) = std::env::var("HUDDLE_DATABASE") {
            self.database = PathBuf::from(database);
        }
        if let Ok(port) = std::env::var("HUDDLE_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid HUDDLE_PORT"),
            }
        }
        if let Ok(host) = std::env::var("HUDDLE_PUBLIC_HOST") {
            self.public_host = host;
        }
        if let Ok(secret) = std::env::var("HUDDLE_SIGNING_SECRET") {
            self.signing_secret = secret;
        }
        if let Ok(password) = std::env::var("HUDDLE_SMTP_PASSWORD") {
            self.mail.smtp_password = password;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.mail.smtp_port, 587);
    }

    #[test]
    fn parses_partial_yaml_with_defaults() {
        let config: Config = serde_yaml::from_str(
            "port: 9000\nsigning_secret: s3cret\nmail:\n  from_email: noreply@huddle.io\n",
        )
        .expect("partial config should parse");

        assert_eq!(config.port, 9000);
        assert_eq!(config.signing_secret, "s3cret");
        assert_eq!(config.mail.from_email, "noreply@huddle.io");
        // Unspecified fields fall back to defaults
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.token_ttl_hours, 24);
    }
}
