//! Client configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;

use crate::error::ClientError;

pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:8080/ws";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(ClientError::config(format!(
                "CLIENT_LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    pub log_format: LogFormat,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            log_format: LogFormat::default(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ClientError> {
        let server_url =
            env::var("CLIENT_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        let log_format = match env::var("CLIENT_LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => LogFormat::default(),
        };

        let timeout_str = env::var("CLIENT_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_CONNECT_TIMEOUT_SECS.to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
            ClientError::config(format!(
                "CLIENT_CONNECT_TIMEOUT_SECS must be a whole number of seconds, got '{timeout_str}'"
            ))
        })?;

        let config = Self {
            server_url,
            log_format,
            connect_timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that hold no matter where the values came from.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.server_url.starts_with("ws://") || self.server_url.starts_with("wss://")) {
            return Err(ClientError::config(format!(
                "server url must be a ws:// or wss:// url, got '{}'",
                self.server_url
            )));
        }
        if self.connect_timeout.is_zero() {
            return Err(ClientError::config(
                "connect timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}
